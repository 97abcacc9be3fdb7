//! Config file location and loading.

use crate::env::resolve_env_vars_with;
use crate::schema::SlashgateConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name, relative to the working directory.
pub const CONFIG_FILE_NAME: &str = "slashgate.yaml";

/// Env var that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "SLASHGATE_CONFIG";

/// Resolve the config file path.
/// Priority: explicit path > `SLASHGATE_CONFIG` env > `./slashgate.yaml`
pub fn config_file_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk, substituting `${VAR}` references
/// from the process environment.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<SlashgateConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(SlashgateConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let env: HashMap<String, String> = std::env::vars().collect();
    let config = parse_config(&raw, &env)
        .with_context(|| format!("Failed to load config at: {}", path.display()))?;

    info!(path = %path.display(), commands = config.commands.len(), "Loaded config");
    Ok(config)
}

/// Parse YAML text into a typed config, resolving env vars from `env`.
///
/// An empty document yields the defaults.
pub fn parse_config(raw: &str, env: &HashMap<String, String>) -> Result<SlashgateConfig> {
    let value: Value = serde_yaml::from_str(raw).context("Failed to parse config YAML")?;
    if value.is_null() {
        return Ok(SlashgateConfig::default());
    }

    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;

    serde_json::from_value(value).context("Failed to deserialize config")
}
