//! slashgate configuration schema.
//!
//! Typed for serde YAML/JSON deserialization. Every section is optional in
//! the file; missing sections fall back to their `Default`. A command listed
//! with no body (`ping:`) gets the default command settings, and numeric or
//! boolean param values are kept as their string form.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlashgateConfig {
    /// HTTP endpoint settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Registered commands, keyed by command name
    #[serde(default, deserialize_with = "deserialize_commands")]
    pub commands: BTreeMap<String, CommandConfig>,
}

impl Default for SlashgateConfig {
    /// A fresh install answers `ping` and nothing else.
    fn default() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("ping".to_string(), CommandConfig::default());
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            commands,
        }
    }
}

fn deserialize_commands<'de, D>(deserializer: D) -> Result<BTreeMap<String, CommandConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<CommandConfig>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, command)| (name, command.unwrap_or_default()))
        .collect())
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Route the chat platform posts to.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            path: default_path(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path() -> String {
    "/".to_string()
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Directory for daily-rolling NDJSON logs. Console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Emit JSON on the console instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Per-command registration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandConfig {
    /// Built-in handler name; defaults to the command name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    /// Shared secret the platform sends as `token`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Accepted HTTP methods.
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,

    /// Extra named values passed to every invocation. Numbers and booleans
    /// are accepted and stored as strings.
    #[serde(
        default,
        deserialize_with = "deserialize_params",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub params: BTreeMap<String, String>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            handler: None,
            token: None,
            methods: default_methods(),
            params: BTreeMap::new(),
        }
    }
}

impl CommandConfig {
    /// Handler name to resolve for command `name`.
    pub fn handler_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.handler.as_deref().unwrap_or(name)
    }
}

pub fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

fn deserialize_params<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(de::Error::custom(format!(
                        "param '{key}' must be a string, number or boolean, got {other}"
                    )));
                }
            };
            Ok((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_gets_defaults() {
        let cfg: SlashgateConfig = serde_yaml::from_str("commands:\n  deploy: {}\n").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.path, "/");
        assert_eq!(cfg.logging.level, "info");

        let deploy = &cfg.commands["deploy"];
        assert_eq!(deploy.methods, vec!["GET".to_string()]);
        assert!(deploy.token.is_none());
        assert_eq!(deploy.handler_name("deploy"), "deploy");
    }

    #[test]
    fn default_config_serves_ping() {
        let cfg = SlashgateConfig::default();
        assert_eq!(cfg.commands.keys().collect::<Vec<_>>(), vec!["ping"]);
    }

    #[test]
    fn explicit_handler_overrides_name() {
        let yaml = r#"
commands:
  shipit:
    handler: echo
    token: abc
    methods: [POST]
    params:
      env: prod
"#;
        let cfg: SlashgateConfig = serde_yaml::from_str(yaml).unwrap();
        let shipit = &cfg.commands["shipit"];
        assert_eq!(shipit.handler_name("shipit"), "echo");
        assert_eq!(shipit.token.as_deref(), Some("abc"));
        assert_eq!(shipit.methods, vec!["POST".to_string()]);
        assert_eq!(shipit.params["env"], "prod");
    }

    #[test]
    fn bare_command_key_gets_defaults() {
        let cfg: SlashgateConfig = serde_yaml::from_str("commands:\n  ping:\n  help:\n").unwrap();
        assert_eq!(cfg.commands.keys().collect::<Vec<_>>(), vec!["help", "ping"]);
        assert_eq!(cfg.commands["ping"].methods, vec!["GET".to_string()]);
        assert!(cfg.commands["help"].params.is_empty());
    }

    #[test]
    fn scalar_params_become_strings() {
        let yaml = r#"
commands:
  deploy:
    params:
      retries: 3
      dryRun: true
      ratio: 0.5
      env: prod
"#;
        let cfg: SlashgateConfig = serde_yaml::from_str(yaml).unwrap();
        let params = &cfg.commands["deploy"].params;
        assert_eq!(params["retries"], "3");
        assert_eq!(params["dryRun"], "true");
        assert_eq!(params["ratio"], "0.5");
        assert_eq!(params["env"], "prod");
    }

    #[test]
    fn nested_param_values_are_rejected() {
        let yaml = "commands:\n  deploy:\n    params:\n      targets: [a, b]\n";
        let err = serde_yaml::from_str::<SlashgateConfig>(yaml).unwrap_err().to_string();
        assert!(err.contains("targets"), "{err}");
    }
}
