//! Submission lifecycle states.
//!
//! A form instance moves through a small, fixed set of states while it is
//! validated and submitted. The `State` trait gives those states the pure
//! inspection methods the guard and history types rely on.

use crate::client::AuthTokens;
use crate::controller::FormError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle states tracked by [`StateHistory`](super::StateHistory)
/// and checked by [`Guard`](super::Guard).
///
/// All methods are pure. States are plain values describing where a form
/// currently is in its submit cycle.
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this state settles a submission (no response is pending).
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// What a successful submission produced.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum SubmitSuccess {
    /// Login accepted; the host keeps these tokens as its session.
    Authenticated(AuthTokens),

    /// Account created; the host should navigate to `redirect_to`.
    Registered { redirect_to: String },

    /// Refresh token revoked.
    LoggedOut,
}

/// Lifecycle of one form instance.
///
/// ```text
/// Idle --submit--> Validating --(invalid)--> Idle
///                  Validating --(valid)----> Submitting --(ok)----> Succeeded
///                                            Submitting --(error)-> Failed
/// ```
///
/// # Example
///
/// ```rust
/// use authform::core::{State, SubmissionState};
///
/// let state = SubmissionState::Submitting;
/// assert_eq!(state.name(), "Submitting");
/// assert!(state.is_in_flight());
/// assert!(!state.is_final());
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum SubmissionState {
    /// Mounted, or back to editing after a rejected attempt.
    #[default]
    Idle,

    /// Field rules are being evaluated.
    Validating,

    /// A remote call is in flight.
    Submitting,

    /// The remote call succeeded.
    Succeeded(SubmitSuccess),

    /// The remote call failed with a form-level error.
    Failed(FormError),
}

impl SubmissionState {
    /// True while a submit attempt has started and not yet settled.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }

    /// Tokens held by a successful login, if any.
    pub fn tokens(&self) -> Option<&AuthTokens> {
        match self {
            Self::Succeeded(SubmitSuccess::Authenticated(tokens)) => Some(tokens),
            _ => None,
        }
    }

    /// Form-level error from the last attempt, if it failed.
    pub fn failure(&self) -> Option<&FormError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl State for SubmissionState {
    fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating",
            Self::Submitting => "Submitting",
            Self::Succeeded(_) => "Succeeded",
            Self::Failed(_) => "Failed",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
