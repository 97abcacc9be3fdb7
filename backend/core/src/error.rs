use thiserror::Error;

/// Validation failure raised while matching a request against the registry.
///
/// The `Display` output is the exact text sent back to the caller, so the
/// wording here is part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command {} is not found", or_none(.command))]
    UnknownCommand { command: Option<String> },

    #[error("{method} request is not allowed")]
    MethodNotAllowed { method: String },

    #[error("Your token {} is invalid", or_none(.token))]
    InvalidToken { token: Option<String> },
}

impl CommandError {
    /// Stable, machine-friendly name of the failure kind (used in logs).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownCommand { .. } => "unknown_command",
            Self::MethodNotAllowed { .. } => "method_not_allowed",
            Self::InvalidToken { .. } => "invalid_token",
        }
    }
}

// Absent values render as `None`.
fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}
