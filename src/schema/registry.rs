//! Standard fields shared by the login and registration forms.

use crate::schema::builder::{FieldBuilder, FormSchemaBuilder};
use crate::schema::form::FormSchema;
use crate::schema::rules::Pattern;

pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirm_password";
pub const TERMS: &str = "terms";

const TERMS_MESSAGE: &str = "You must accept the terms and conditions";

fn person_name(name: &str, label: &str) -> FieldBuilder {
    FieldBuilder::new(name)
        .min_len(2, format!("{label} must be at least 2 characters"))
        .max_len(50)
        .matches(
            Pattern::Letters,
            format!("{label} must contain only alphabets"),
        )
        .required(format!("{label} is required"))
}

pub fn first_name() -> FieldBuilder {
    person_name(FIRST_NAME, "First name")
}

pub fn last_name() -> FieldBuilder {
    person_name(LAST_NAME, "Last name")
}

pub fn email() -> FieldBuilder {
    FieldBuilder::new(EMAIL)
        .email("Invalid email address")
        .required("Email is required")
}

pub fn password() -> FieldBuilder {
    FieldBuilder::secret(PASSWORD)
        .min_len(8, "Password must be at least 8 characters")
        .max_len(128)
        .matches(
            Pattern::StrongPassword,
            "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character",
        )
        .required("Password is required")
}

pub fn confirm_password() -> FieldBuilder {
    FieldBuilder::secret(CONFIRM_PASSWORD)
        .equals_field(PASSWORD, "Passwords must match")
        .required("Confirm password is required")
}

pub fn terms() -> FieldBuilder {
    FieldBuilder::flag(TERMS)
        .accepted(TERMS_MESSAGE)
        .required(TERMS_MESSAGE)
}

/// Email and password.
pub fn login_schema() -> FormSchema {
    FormSchemaBuilder::new()
        .field(email())
        .and_then(|b| b.field(password()))
        .and_then(FormSchemaBuilder::build)
        .expect("Login schema should always build")
}

/// Names, email, password with confirmation, and terms acceptance.
pub fn register_schema() -> FormSchema {
    FormSchemaBuilder::new()
        .field(first_name())
        .and_then(|b| b.field(last_name()))
        .and_then(|b| b.field(email()))
        .and_then(|b| b.field(password()))
        .and_then(|b| b.field(confirm_password()))
        .and_then(|b| b.field(terms()))
        .and_then(FormSchemaBuilder::build)
        .expect("Register schema should always build")
}
