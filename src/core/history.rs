//! Submission lifecycle history.
//!
//! Every state change a form goes through is recorded with its timestamp and
//! the submit attempt it belongs to. Hosts use it for diagnostics; tests use
//! it to check the order states were visited in.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single state change.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
    /// Submit attempt number (0 for changes made by editing)
    pub attempt: usize,
}

/// Ordered history of state changes.
///
/// `record` returns a new history and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use authform::core::{StateHistory, StateTransition, SubmissionState};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: SubmissionState::Idle,
///     to: SubmissionState::Validating,
///     timestamp: Utc::now(),
///     attempt: 1,
/// });
///
/// assert_eq!(history.get_path(), vec![&SubmissionState::Idle, &SubmissionState::Validating]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States visited in order: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Names of the visited states, in order.
    pub fn names(&self) -> Vec<&str> {
        self.get_path().into_iter().map(State::name).collect()
    }

    /// Transitions recorded for one submit attempt.
    pub fn for_attempt(&self, attempt: usize) -> impl Iterator<Item = &StateTransition<S>> {
        self.transitions
            .iter()
            .filter(move |transition| transition.attempt == attempt)
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
