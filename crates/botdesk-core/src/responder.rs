//! Responder gateway port.
//!
//! The remote conversational backend is reached through [`Responder`]. The
//! session only needs reply text or a failure; any per-assistant backend
//! context (persona instructions, running chat history) is the
//! implementation's concern.

use std::time::Duration;

use thiserror::Error;

use crate::assistant::Assistant;

/// Failure reported by a responder. Never fatal to the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponderError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {message}")]
    Transport { message: String, is_retryable: bool },

    /// The backend answered with a non-success status.
    #[error("backend returned {status_code}: {message}")]
    Status {
        status_code: u16,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The backend answered but carried no text.
    #[error("backend returned no text")]
    EmptyResponse,

    #[error("{0}")]
    Other(String),
}

impl ResponderError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { is_retryable, .. } | Self::Status { is_retryable, .. } => {
                *is_retryable
            }
            _ => false,
        }
    }
}

/// Produces a reply for a prompt addressed to an assistant.
///
/// At most one call per assistant is outstanding at a time; the session's
/// awaiting-response gate guarantees it.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, assistant: &Assistant, prompt: &str) -> Result<String, ResponderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let throttled = ResponderError::Status {
            status_code: 429,
            message: "slow down".to_string(),
            is_retryable: true,
            retry_after: Some(Duration::from_secs(2)),
        };
        assert!(throttled.is_retryable());
        assert!(!ResponderError::EmptyResponse.is_retryable());
        assert_eq!(throttled.to_string(), "backend returned 429: slow down");
    }
}
