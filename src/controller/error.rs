//! Form-level errors and remote failure attribution.

use crate::client::ClientError;
use crate::schema::registry::{EMAIL, PASSWORD};
use crate::schema::FormSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a host shows above the form rather than next to a field.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Your session is no longer valid, please log in again")]
    InvalidToken,

    #[error("You are not logged in")]
    NotAuthenticated,

    #[error("{message}")]
    Rejected { message: String },

    #[error("Unable to reach the server, please try again")]
    Unavailable { detail: String },
}

impl From<ClientError> for FormError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::InvalidCredentials => Self::InvalidCredentials,
            ClientError::InvalidToken => Self::InvalidToken,
            ClientError::Conflict { reason, .. } => Self::Rejected { message: reason },
            ClientError::Rejected { status, message } if message.is_empty() => Self::Rejected {
                message: format!("Request rejected with status {status}"),
            },
            ClientError::Rejected { message, .. } => Self::Rejected { message },
            ClientError::Transport(detail)
            | ClientError::Decode(detail)
            | ClientError::Config(detail) => {
                Self::Unavailable { detail }
            }
        }
    }
}

/// Where a remote failure should be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Attribution {
    Field { field: String, message: String },
    Form(FormError),
}

/// Inline message for a field the API rejected.
fn conflict_message(field: &str, reason: String) -> String {
    match field {
        EMAIL => "Email is already in use".to_string(),
        PASSWORD => "Password is not strong".to_string(),
        _ => reason,
    }
}

/// Map a remote failure onto a field of `schema` when it names one.
pub(crate) fn attribute(error: ClientError, schema: &FormSchema) -> Attribution {
    match error {
        ClientError::Conflict { field, reason } if schema.contains(&field) => {
            let message = conflict_message(&field, reason);
            Attribution::Field { field, message }
        }
        other => Attribution::Form(other.into()),
    }
}
