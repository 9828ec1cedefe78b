//! Client error types

use std::collections::BTreeMap;

use http::StatusCode;
use thiserror::Error;

/// Field name to validation messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connect, timeout, TLS, body read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Session expired, missing or rejected credentials (401), with the
    /// server's message
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// State conflict (409), e.g. restoring a resource that is not deleted
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Payload rejected, locally or by the server
    #[error("Validation error: {message}")]
    Validation { message: String, errors: FieldErrors },

    /// Any other non-success answer from the server
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response did not match the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token storage failure
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse failure classes callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Re-authentication required
    AuthExpired,
    /// Show per-field messages
    Validation,
    /// Everything else; show a generic failure
    NetworkOrServer,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::AuthExpired,
            Self::Validation { .. } => ErrorKind::Validation,
            _ => ErrorKind::NetworkOrServer,
        }
    }

    /// True when the failed call is known not to have changed anything on
    /// the server, so repeating it is safe.
    ///
    /// Timeouts after the request was sent, 5xx answers and malformed
    /// success bodies leave the outcome unknown and return `false`.
    pub fn is_retry_safe(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_builder(),
            Self::Unauthorized(_)
            | Self::Forbidden(_)
            | Self::NotFound(_)
            | Self::Conflict(_)
            | Self::Validation { .. }
            | Self::Config(_)
            | Self::Storage(_) => true,
            Self::Api { status, .. } => (400..500).contains(status),
            Self::InvalidResponse(_) => false,
        }
    }

    /// Field errors of a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Map a non-success status and its envelope details to an error
    pub(crate) fn from_status(status: StatusCode, message: String, errors: Option<FieldErrors>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation {
                message,
                errors: errors.unwrap_or_default(),
            },
            _ => match errors {
                Some(errors) if !errors.is_empty() => Self::Validation { message, errors },
                _ => Self::Api {
                    status: status.as_u16(),
                    message,
                },
            },
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(value: validator::ValidationErrors) -> Self {
        let mut errors = FieldErrors::new();
        for (field, field_errors) in value.field_errors() {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            errors.insert(field.to_string(), messages);
        }
        Self::Validation {
            message: "Validation failed".into(),
            errors,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
