//! Gateway error taxonomy.

use serde_json::Value;
use smp_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401: the session was cleared and the user sent to login.
    #[error("session is invalid or expired")]
    Unauthorized { message: Option<String> },

    /// HTTP 5xx: the user was sent to the error screen.
    #[error("server fault ({code}): {message}")]
    ServerFault { code: u16, message: String },

    /// No response at all: the user was sent to the error screen.
    #[error("network error: {0}")]
    Network(String),

    /// Other 4xx: the server message was already shown as a toast.
    #[error("request rejected ({status}): {message}")]
    Validation {
        status: u16,
        message: String,
        errors: Option<Value>,
    },

    /// A successful response whose payload did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Client-side validation blocked the call before any network traffic.
    #[error(transparent)]
    Local(#[from] DomainError),
}

impl ApiError {
    /// Whether the gateway already redirected or notified for this failure.
    pub fn is_handled(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. }
                | ApiError::ServerFault { .. }
                | ApiError::Network(_)
                | ApiError::Validation { .. }
        )
    }

    /// Message suitable for a toast or inline form error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Local(e) => e.user_message(),
            ApiError::Unauthorized { message } => message
                .clone()
                .unwrap_or_else(|| "Your session has expired".to_string()),
            other => other.to_string(),
        }
    }

    /// Server-supplied field errors of a rejected request, if any.
    pub fn field_errors(&self) -> Option<&Value> {
        match self {
            ApiError::Validation { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }
}
