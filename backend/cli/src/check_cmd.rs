//! CLI Check Command
//!
//! Loads a config file, prints it with tokens masked, and lists every
//! validation finding.

use anyhow::Result;
use slashgate_commands::BUILTIN_HANDLERS;
use slashgate_config::{load_config, redact, validate};
use std::path::Path;

/// Returns `false` when the config has errors.
pub async fn run(path: &Path) -> Result<bool> {
    println!("\nChecking {}\n", path.display());

    let config = load_config(path).await?;
    let redacted = redact(&serde_json::to_value(&config)?);
    println!("{}\n", serde_json::to_string_pretty(&redacted)?);

    let mut report = validate(&config);
    for (name, command) in &config.commands {
        let handler = command.handler_name(name);
        if !BUILTIN_HANDLERS.contains(&handler) {
            report.errors.push(slashgate_config::ConfigValidationError {
                path: format!("commands.{name}.handler"),
                message: format!(
                    "Unknown handler '{handler}'. Available: {}",
                    BUILTIN_HANDLERS.join(", ")
                ),
            });
        }
    }

    for warning in &report.warnings {
        println!("  ⚠️  {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  ❌ {}: {}", error.path, error.message);
    }

    println!();
    if report.is_valid() {
        println!("✅ Config OK ({} command(s))", config.commands.len());
    } else {
        println!("❌ {} error(s) found", report.errors.len());
    }
    Ok(report.is_valid())
}
