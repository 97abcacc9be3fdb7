//! Main HTTP Gateway Server.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::Request, routing::get, Router};
use slashgate_commands::CommandDispatcher;
use slashgate_logging::redact_sensitive_data;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, Span};

use crate::endpoint;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub dispatcher: Arc<CommandDispatcher>,
}

impl GatewayState {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self { dispatcher: Arc::new(dispatcher) }
    }
}

/// Path of the built-in health route. The command endpoint may not reuse it.
pub const HEALTH_PATH: &str = "/health";

/// Build the router: the command endpoint at `path` (GET and POST only) and
/// `GET /health`.
pub fn router(state: GatewayState, path: &str) -> Router {
    Router::new()
        .route(path, get(endpoint::handle_command).post(endpoint::handle_command))
        .route(HEALTH_PATH, get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

// GET requests carry the command token in the query string.
fn request_span(req: &Request) -> Span {
    tracing::debug_span!(
        "request",
        method = %req.method(),
        uri = %redact_sensitive_data(&req.uri().to_string()),
        version = ?req.version(),
    )
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: GatewayState, path: &str, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state, path);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Starts the gateway and runs until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState, path: &str) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!(
        commands = ?state.dispatcher.registry().names(),
        "Gateway listening on {}{}", addr, path
    );
    serve(listener, state, path, shutdown_signal()).await?;
    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
