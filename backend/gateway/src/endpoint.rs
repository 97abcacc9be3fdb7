//! The slash command endpoint.
//!
//! Turns one HTTP request into an [`InboundRequest`], dispatches it, and
//! serializes the reply. Validation failures are ordinary 200 replies.

use axum::{
    extract::{Form, FromRequest, Query, Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slashgate_commands::InboundRequest;
use slashgate_core::Params;
use tracing::{error, warn};

use crate::server::GatewayState;

type Pairs = Vec<(String, String)>;

/// Handler for `GET|POST <path>`.
pub async fn handle_command(State(state): State<GatewayState>, request: Request) -> Response {
    let method = request.method().clone();

    let query: Params = match Query::<Pairs>::try_from_uri(request.uri()) {
        Ok(Query(pairs)) => pairs.into_iter().collect(),
        Err(rejection) => {
            warn!(%rejection, "[Gateway] Unreadable query string; treating as empty");
            Params::new()
        }
    };

    let form: Params = if method == Method::POST {
        match Form::<Pairs>::from_request(request, &state).await {
            Ok(Form(pairs)) => pairs.into_iter().collect(),
            Err(rejection) => {
                warn!(%rejection, "[Gateway] Unreadable form body; treating as empty");
                Params::new()
            }
        }
    } else {
        Params::new()
    };

    let inbound = InboundRequest::new(method.as_str(), query, form);

    match state.dispatcher.dispatch(&inbound) {
        Ok(envelope) => Json(envelope).into_response(),
        Err(err) => {
            error!(error = %err, "[Gateway] Command handler failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
