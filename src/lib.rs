//! Authform: validated login and registration forms over a remote auth API
//!
//! The crate keeps form logic in a pure core and pushes the network to the
//! edge:
//!
//! - **Schemas**: typed field rules evaluated by a pure function
//! - **Strength**: a heuristic password score for display
//! - **Fields**: bindings between inputs, their values and their errors
//! - **Controller**: the validate → submit → settle state machine, one per form
//! - **Client**: the `AuthBackend` seam and its HTTP implementation
//!
//! # Example
//!
//! ```rust
//! use authform::controller::{Begin, FormController};
//! use authform::core::SubmissionState;
//! use authform::forms::login_form;
//!
//! let mut form: FormController = login_form();
//! form.edit("email", "a@b.com").unwrap();
//! form.edit("password", "abc").unwrap();
//!
//! assert_eq!(form.begin(), Begin::Invalid);
//! assert_eq!(form.state(), &SubmissionState::Idle);
//! assert_eq!(
//!     form.field("password").and_then(|f| f.error),
//!     Some("Password must be at least 8 characters")
//! );
//! ```

pub mod client;
pub mod controller;
pub mod core;
pub mod fields;
pub mod forms;
pub mod schema;
pub mod settings;
pub mod strength;

// Re-export commonly used types
pub use client::{AuthBackend, AuthTokens, ClientError, HttpAuthClient, NewUser};
pub use controller::{Begin, FormController, FormError, Outcome, ValidationMode};
pub use self::core::{State, SubmissionState, SubmitSuccess};
pub use schema::{FormSchema, RawValues, ValidationResult};
pub use settings::AuthConfig;
pub use strength::{StrengthBand, StrengthReport};
