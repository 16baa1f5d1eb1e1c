//! Guard predicates over lifecycle states.
//!
//! The submission controller consults a guard before starting an attempt so
//! that a second submit trigger arriving mid-flight is dropped.

use super::state::State;
use std::fmt;
use std::marker::PhantomData;

/// Pure predicate deciding whether an action may start from a state.
///
/// # Example
///
/// ```rust
/// use authform::core::{Guard, SubmissionState};
///
/// let can_submit = Guard::new(|state: &SubmissionState| !state.is_in_flight());
///
/// assert!(can_submit.check(&SubmissionState::Idle));
/// assert!(!can_submit.check(&SubmissionState::Submitting));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Check if the guard allows the action from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
