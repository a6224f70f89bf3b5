//! LLM request/response types for QuestForge.
//!
//! These types model the data shapes for the chat-completion exchange with
//! the remote model and the failures it can produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
        }
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a completion.
///
/// An empty `model` means "use the provider's configured model".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from an LLM provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    /// Raw text of the first choice, exactly as returned by the model.
    pub content: String,
    pub model: String,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The service could not be reached, or the request timed out.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("response contained no choices")]
    EmptyResponse,
}

/// Failure payload returned to callers when the model call fails.
///
/// Serializes as `{"error": <status or null>, "details": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportFailure {
    pub error: Option<u16>,
    pub details: String,
}

impl From<LlmError> for TransportFailure {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http { status, body } => Self {
                error: Some(status),
                details: body,
            },
            other => Self {
                error: None,
                details: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_wire_names() {
        assert_eq!(MessageRole::System.to_string(), "system");
        assert_eq!(Message::user("hi").role.to_string(), "user");
        assert_eq!(serde_json::to_value(MessageRole::System).unwrap(), "system");
    }

    #[test]
    fn test_completion_request_omits_missing_temperature() {
        let request = CompletionRequest {
            model: "m".into(),
            messages: vec![Message::user("hi")],
            temperature: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_transport_failure_from_http_error() {
        let failure = TransportFailure::from(LlmError::Http {
            status: 429,
            body: "slow down".into(),
        });
        assert_eq!(failure.error, Some(429));
        assert_eq!(failure.details, "slow down");

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json, serde_json::json!({"error": 429, "details": "slow down"}));
    }

    #[test]
    fn test_transport_failure_without_status() {
        let failure = TransportFailure::from(LlmError::Transport("connection refused".into()));
        assert_eq!(failure.error, None);
        assert!(failure.details.contains("connection refused"));
    }
}
