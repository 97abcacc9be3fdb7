/// Built-in command handlers.
///
/// Small handlers the `slashgate` binary can bind to configured commands by
/// name. Applications embedding the dispatcher register their own.
use std::sync::Arc;

use anyhow::Result;
use slashgate_core::{Params, ResponseEnvelope};
use tracing::info;

use crate::dispatch::CommandHandler;

/// Names accepted by [`builtin_handler`].
pub const BUILTIN_HANDLERS: &[&str] = &["ping", "echo", "whoami", "help"];

/// Resolve a built-in handler by name. `commands` feeds the `help` listing.
pub fn builtin_handler(name: &str, commands: &[String]) -> Option<Arc<dyn CommandHandler>> {
    let handler: Arc<dyn CommandHandler> = match name {
        "ping" => Arc::new(PingHandler),
        "echo" => Arc::new(EchoHandler),
        "whoami" => Arc::new(WhoAmIHandler),
        "help" => Arc::new(HelpHandler { commands: commands.to_vec() }),
        _ => return None,
    };
    Some(handler)
}

// ---------------------------------------------------------------------------
// /ping
// ---------------------------------------------------------------------------

pub struct PingHandler;

impl CommandHandler for PingHandler {
    fn handle(&self, _params: &Params) -> Result<ResponseEnvelope> {
        Ok(ResponseEnvelope::ephemeral("pong"))
    }
}

// ---------------------------------------------------------------------------
// /echo
// ---------------------------------------------------------------------------

/// Repeats `text` into the channel.
pub struct EchoHandler;

impl CommandHandler for EchoHandler {
    fn handle(&self, params: &Params) -> Result<ResponseEnvelope> {
        match params.get("text").map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => {
                info!(user = params.get("user_name").unwrap_or("?"), "[Commands] Echoing text");
                Ok(ResponseEnvelope::in_channel(text))
            }
            None => Ok(ResponseEnvelope::ephemeral("Usage: /echo <text>")),
        }
    }
}

// ---------------------------------------------------------------------------
// /whoami
// ---------------------------------------------------------------------------

pub struct WhoAmIHandler;

impl CommandHandler for WhoAmIHandler {
    fn handle(&self, params: &Params) -> Result<ResponseEnvelope> {
        let name = params.get("user_name").unwrap_or("unknown");
        let text = match params.get("user_id") {
            Some(id) => format!("You are {name} ({id})"),
            None => format!("You are {name}"),
        };
        Ok(ResponseEnvelope::ephemeral(text))
    }
}

// ---------------------------------------------------------------------------
// /help
// ---------------------------------------------------------------------------

pub struct HelpHandler {
    pub commands: Vec<String>,
}

impl CommandHandler for HelpHandler {
    fn handle(&self, _params: &Params) -> Result<ResponseEnvelope> {
        let mut lines = vec!["Available commands:".to_string()];
        for name in &self.commands {
            lines.push(format!("• /{name}"));
        }
        Ok(ResponseEnvelope::ephemeral(lines.join("\n")))
    }
}
