//! Submission lifecycle core.
//!
//! This module holds the pure pieces of the submit state machine:
//! - `SubmissionState` and the `State` trait it implements
//! - `Guard` predicates that decide whether an attempt may start
//! - `StateHistory`, the immutable record of visited states
//!
//! Nothing here performs I/O; the controller drives these types.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::{State, SubmissionState, SubmitSuccess};
