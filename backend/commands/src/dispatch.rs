/// Command dispatch — validate an inbound request and route it to its handler.
use std::sync::Arc;

use anyhow::Result;
use slashgate_config::{CommandConfig, SlashgateConfig};
use slashgate_core::{CommandError, Params, ResponseEnvelope};
use slashgate_logging::redact_token;
use tracing::{debug, warn};

use crate::registry::CommandRegistry;
use crate::types::{CommandSpec, Registration};

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Application code run for a matched command.
///
/// Receives the registration's extra params overlaid with every request
/// parameter. An `Err` is not turned into a reply; it reaches the HTTP layer.
pub trait CommandHandler: Send + Sync {
    fn handle(&self, params: &Params) -> Result<ResponseEnvelope>;
}

impl<F> CommandHandler for F
where
    F: Fn(&Params) -> Result<ResponseEnvelope> + Send + Sync,
{
    fn handle(&self, params: &Params) -> Result<ResponseEnvelope> {
        self(params)
    }
}

// ---------------------------------------------------------------------------
// Inbound request
// ---------------------------------------------------------------------------

/// The parts of one HTTP request the dispatcher looks at.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub method: String,
    pub query: Params,
    pub form: Params,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>, query: Params, form: Params) -> Self {
        Self { method: method.into(), query, form }
    }

    /// Parameter source: the form body for `POST`, the query string for
    /// anything else.
    ///
    /// The endpoint only routes GET and POST, so the query fallback for other
    /// verbs is only reachable when calling the dispatcher directly.
    pub fn params(&self) -> &Params {
        if self.method == "POST" { &self.form } else { &self.query }
    }

    pub fn token(&self) -> Option<&str> {
        self.params().get("token")
    }

    /// Command name from `command`, falling back to `trigger_word` when
    /// `command` is absent or empty.
    pub fn command(&self) -> Option<&str> {
        let params = self.params();
        let raw = params
            .get("command")
            .filter(|c| !c.is_empty())
            .or_else(|| params.get("trigger_word"))?;
        Some(extract_command(raw))
    }
}

/// Trim surrounding whitespace, then drop at most one leading `/`.
pub fn extract_command(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('/').unwrap_or(trimmed)
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Owns the command registry and the attached configuration. Built once at
/// startup and shared by every request.
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    registry: CommandRegistry,
    config: Option<Arc<SlashgateConfig>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dispatcher from config, resolving each command's handler by
    /// name with `resolve`.
    pub fn from_config<R>(config: SlashgateConfig, resolve: R) -> Result<Self>
    where
        R: Fn(&str) -> Option<Arc<dyn CommandHandler>>,
    {
        let mut dispatcher = Self::new();
        for (name, command) in &config.commands {
            let handler_name = command.handler_name(name);
            let handler = resolve(handler_name).ok_or_else(|| {
                anyhow::anyhow!("No handler named '{handler_name}' for command '{name}'")
            })?;
            dispatcher.register_configured(name.clone(), handler, command);
        }
        dispatcher.init_config(config);
        Ok(dispatcher)
    }

    /// Attach application configuration.
    pub fn init_config(&mut self, config: SlashgateConfig) {
        self.config = Some(Arc::new(config));
    }

    pub fn config(&self) -> Option<&SlashgateConfig> {
        self.config.as_deref()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn register(&mut self, command: impl Into<String>, spec: CommandSpec) {
        self.registry.register(command, spec);
    }

    /// Register `handler` with the token, methods and params from `config`.
    pub fn register_configured(
        &mut self,
        command: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
        config: &CommandConfig,
    ) {
        let spec = CommandSpec::from_arc(handler)
            .maybe_token(config.token.clone())
            .methods(config.methods.iter().cloned())
            .params(config.params.clone());
        self.registry.register(command, spec);
    }

    pub fn lookup(&self, command: &str) -> Option<&Registration> {
        self.registry.lookup(command)
    }

    /// Check a request against the registry. The first failing check wins:
    /// unknown command, then method, then token.
    pub fn validate(
        &self,
        command: Option<&str>,
        token: Option<&str>,
        method: &str,
    ) -> Result<(), CommandError> {
        self.check(command, token, method).map(|_| ())
    }

    fn check(
        &self,
        command: Option<&str>,
        token: Option<&str>,
        method: &str,
    ) -> Result<&Registration, CommandError> {
        let registration = command
            .and_then(|c| self.registry.lookup(c))
            .ok_or_else(|| CommandError::UnknownCommand { command: command.map(str::to_string) })?;

        if !registration.allows(method) {
            return Err(CommandError::MethodNotAllowed { method: method.to_string() });
        }

        if let Some(secret) = registration.required_token() {
            if token != Some(secret) {
                return Err(CommandError::InvalidToken { token: token.map(str::to_string) });
            }
        }

        Ok(registration)
    }

    /// Route one request.
    ///
    /// Validation failures become an ephemeral reply carrying the error
    /// message. `Err` only comes from the handler itself.
    pub fn dispatch(&self, request: &InboundRequest) -> Result<ResponseEnvelope> {
        let command = request.command();
        let token = request.token();
        let method = request.method.as_str();

        debug!(
            method,
            command = command.unwrap_or("<none>"),
            token = %redact_token(token),
            "[Commands] Dispatching request"
        );

        let registration = match self.check(command, token, method) {
            Ok(registration) => registration,
            Err(err) => {
                warn!(kind = err.kind(), method, "[Commands] Rejected request: {}", reject_reason(&err));
                return Ok(ResponseEnvelope::ephemeral(err.to_string()));
            }
        };

        let params = request.params().merged_over(&registration.params);
        registration.handler.handle(&params)
    }
}

// The invalid-token message echoes the caller's token; keep it out of logs.
fn reject_reason(err: &CommandError) -> String {
    match err {
        CommandError::InvalidToken { token } => {
            format!("token {} does not match", redact_token(token.as_deref()))
        }
        other => other.to_string(),
    }
}
