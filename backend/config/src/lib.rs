//! `slashgate-config` — runtime configuration for the slash command gateway.
//!
//! Provides:
//! - Typed config schema (server endpoint, logging, per-command settings)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Config redaction for safe logging/display
//! - Validation report (errors + warnings)

pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_file_path, load_config, parse_config, CONFIG_FILE_NAME, CONFIG_PATH_ENV};
pub use redact::redact;
pub use schema::{CommandConfig, LoggingConfig, ServerConfig, SlashgateConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

/// Emit every warning and error in `report` through `tracing`.
pub fn log_report(report: &ValidationReport) {
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
}
