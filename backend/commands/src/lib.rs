pub mod dispatch;
pub mod handlers;
pub mod registry;
pub mod types;

pub use dispatch::{extract_command, CommandDispatcher, CommandHandler, InboundRequest};
pub use handlers::{
    builtin_handler, EchoHandler, HelpHandler, PingHandler, WhoAmIHandler, BUILTIN_HANDLERS,
};
pub use registry::CommandRegistry;
pub use types::{CommandSpec, Registration};

use anyhow::Result;
use slashgate_config::SlashgateConfig;

/// Build a dispatcher from config, binding every command to a built-in
/// handler.
pub fn build_default_dispatcher(config: SlashgateConfig) -> Result<CommandDispatcher> {
    let names: Vec<String> = config.commands.keys().cloned().collect();
    CommandDispatcher::from_config(config, |handler| builtin_handler(handler, &names))
}
