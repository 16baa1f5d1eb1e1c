//! Remote failure taxonomy and API error decoding.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by [`AuthBackend`](super::AuthBackend) calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("Invalid user credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    /// The API rejected a value of a specific field (duplicate email, weak password).
    #[error("Field '{field}' rejected: {reason}")]
    Conflict { field: String, reason: String },

    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    extensions: Extensions,
}

#[derive(Deserialize, Default)]
struct Extensions {
    code: Option<String>,
    field: Option<String>,
}

impl ClientError {
    /// Decode a non-success response.
    ///
    /// Only the first reported error is considered.
    pub fn from_response(status: u16, body: &str) -> Self {
        let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
            return Self::Rejected {
                status,
                message: body.trim().to_string(),
            };
        };

        let Some(first) = parsed.errors.into_iter().next() else {
            return Self::Rejected {
                status,
                message: String::new(),
            };
        };

        match (first.extensions.code.as_deref(), first.extensions.field) {
            (Some("INVALID_CREDENTIALS"), _) => Self::InvalidCredentials,
            (Some("INVALID_TOKEN" | "TOKEN_EXPIRED"), _) => Self::InvalidToken,
            (Some("RECORD_NOT_UNIQUE" | "FAILED_VALIDATION"), Some(field)) => Self::Conflict {
                field,
                reason: first.message,
            },
            _ => Self::Rejected {
                status,
                message: first.message,
            },
        }
    }
}
