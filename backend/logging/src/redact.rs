//! Log Redaction
//!
//! Scrubs command tokens and platform credentials from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(token|secret)=([^&\s]+)").unwrap());
static SLACK_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"xox[abposr]-[A-Za-z0-9-]+").unwrap());

/// Redacts `token=...` pairs and Slack-style credentials in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = TOKEN_PARAM_RE.replace_all(input, "$1=[REDACTED]");
    SLACK_TOKEN_RE.replace_all(&redacted, "[REDACTED_TOKEN]").to_string()
}

/// Masks a request token for a log field, keeping only its length.
pub fn redact_token(token: Option<&str>) -> String {
    match token {
        None => "<none>".to_string(),
        Some("") => "<empty>".to_string(),
        Some(t) => format!("<{} chars>", t.chars().count()),
    }
}
