//! Declarative validation schemas for form fields.
//!
//! A [`FormSchema`] is an ordered list of [`FieldSchema`]s, each holding typed
//! [`Rule`]s. Validation is a pure function from posted [`RawValues`] to a
//! [`ValidationResult`]. It uses Stillwater's `Validation` to collect every
//! failing field in one pass; within a field only the first failing rule is
//! reported.
//!
//! # Example
//!
//! ```rust
//! use authform::schema::{registry, RawValues, ValidationResult};
//!
//! let schema = registry::login_schema();
//!
//! let mut raw = RawValues::new();
//! raw.set("email", "a@b.com");
//! raw.set("password", "abc");
//!
//! match schema.validate(&raw) {
//!     ValidationResult::Invalid(errors) => {
//!         assert_eq!(errors["password"], "Password must be at least 8 characters");
//!     }
//!     ValidationResult::Valid(_) => unreachable!(),
//! }
//! ```

pub mod builder;
pub mod error;
pub mod form;
pub mod registry;
pub mod result;
pub mod rules;

pub use builder::{FieldBuilder, FormSchemaBuilder};
pub use error::{BuildError, FieldError};
pub use form::FormSchema;
pub use result::{FieldErrors, FieldValue, FormData, RawValues, ValidationResult, CHECKED};
pub use rules::{FieldKind, FieldSchema, Pattern, Rule};
