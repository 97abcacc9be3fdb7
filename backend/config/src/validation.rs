//! Config validation: schema checks with user-friendly error messages.

use crate::schema::SlashgateConfig;
use thiserror::Error;

/// Methods the dispatch endpoint itself accepts.
const ENDPOINT_METHODS: &[&str] = &["GET", "POST"];

/// Route the gateway serves itself; the endpoint cannot be mounted there.
const HEALTH_PATH: &str = "/health";

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &SlashgateConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_commands(config, &mut report);
    report
}

fn validate_server(config: &SlashgateConfig, report: &mut ValidationReport) {
    if config.server.port == 0 {
        report.error("server.port", "port must be > 0");
    }
    if !config.server.path.starts_with('/') {
        report.error(
            "server.path",
            format!("Endpoint path '{}' must start with '/'", config.server.path),
        );
    }
    if config.server.path == HEALTH_PATH {
        report.error(
            "server.path",
            format!("Endpoint path '{HEALTH_PATH}' is reserved for the health check"),
        );
    }
}

fn validate_commands(config: &SlashgateConfig, report: &mut ValidationReport) {
    if config.commands.is_empty() {
        report.warn("commands", "No commands configured; every request will be rejected");
    }

    for (name, command) in &config.commands {
        let path = format!("commands.{name}");

        // Accepted as-is; it can only be reached by an empty `command` field.
        if name.trim().is_empty() {
            report.warn(&path, "Command name is empty");
        }

        if command.methods.is_empty() {
            report.error(format!("{path}.methods"), "At least one method is required");
        }
        for method in &command.methods {
            if !ENDPOINT_METHODS.contains(&method.as_str()) {
                report.warn(
                    format!("{path}.methods"),
                    format!("Method '{method}' is never routed to the endpoint (only GET and POST are)"),
                );
            }
        }

        if command.token.as_deref().map(str::is_empty).unwrap_or(true) {
            report.warn(format!("{path}.token"), "No token set; any caller may run this command");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CommandConfig;

    fn with_command(command: CommandConfig) -> SlashgateConfig {
        let mut cfg = SlashgateConfig::default();
        cfg.commands.clear();
        cfg.commands.insert("deploy".to_string(), command);
        cfg
    }

    #[test]
    fn default_config_is_valid() {
        let report = validate(&SlashgateConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn empty_methods_is_error() {
        let cfg = with_command(CommandConfig {
            methods: vec![],
            token: Some("abc".into()),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "commands.deploy.methods");
    }

    #[test]
    fn unroutable_method_is_warning() {
        let cfg = with_command(CommandConfig {
            methods: vec!["PUT".into()],
            token: Some("abc".into()),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.message.contains("PUT")));
    }

    #[test]
    fn missing_token_is_warning() {
        let report = validate(&with_command(CommandConfig::default()));
        assert!(report.warnings.iter().any(|w| w.path == "commands.deploy.token"));
    }

    #[test]
    fn bad_path_and_port_are_errors() {
        let mut cfg = SlashgateConfig::default();
        cfg.server.path = "slack".into();
        cfg.server.port = 0;
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn health_path_is_reserved() {
        let mut cfg = SlashgateConfig::default();
        cfg.server.path = "/health".into();
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "server.path");
        assert!(report.errors[0].message.contains("reserved"));

        cfg.server.path = "/health/slack".into();
        assert!(validate(&cfg).is_valid());
    }
}
