//! The JSON reply body returned for every slash command.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Response type
// ---------------------------------------------------------------------------

/// Who gets to see the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only the user who issued the command sees the reply.
    #[default]
    Ephemeral,
    /// Both the reply and the original command are shared in the channel.
    InChannel,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ephemeral => "ephemeral",
            Self::InChannel => "in_channel",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown response type: {0}")]
pub struct UnknownResponseType(pub String);

impl FromStr for ResponseType {
    type Err = UnknownResponseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ephemeral" => Ok(Self::Ephemeral),
            "in_channel" => Ok(Self::InChannel),
            other => Err(UnknownResponseType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// `{ "response_type": ..., "text": ..., "attachments": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub response_type: ResponseType,
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Value>,
}

impl ResponseEnvelope {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        build_response(text, ResponseType::Ephemeral, None)
    }

    pub fn in_channel(text: impl Into<String>) -> Self {
        build_response(text, ResponseType::InChannel, None)
    }

    /// Append one rich attachment.
    pub fn with_attachment(mut self, attachment: Value) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Build a reply envelope.
///
/// Passing `None` for `attachments` yields a new empty list owned by this
/// envelope alone.
pub fn build_response(
    text: impl Into<String>,
    response_type: ResponseType,
    attachments: Option<Vec<Value>>,
) -> ResponseEnvelope {
    ResponseEnvelope {
        response_type,
        text: text.into(),
        attachments: attachments.unwrap_or_default(),
    }
}
