//! Request and response bodies exchanged with the auth API.

use crate::schema::registry::{EMAIL, FIRST_NAME, LAST_NAME, PASSWORD};
use crate::schema::FormData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token pair returned by a successful login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in milliseconds, when the API reports it.
    #[serde(default)]
    pub expires: Option<u64>,
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires", &self.expires)
            .finish()
    }
}

/// User record sent on registration.
///
/// Confirmation and terms fields exist only for validation and are not
/// part of the record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl From<&FormData> for NewUser {
    fn from(data: &FormData) -> Self {
        let text = |name: &str| data.text(name).unwrap_or_default().to_string();
        Self {
            first_name: text(FIRST_NAME),
            last_name: text(LAST_NAME),
            email: text(EMAIL),
            password: text(PASSWORD),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub mode: &'static str,
}

#[derive(Serialize)]
pub(crate) struct LogoutRequest<'a> {
    pub refresh_token: &'a str,
    pub mode: &'static str,
}

/// `{"data": ...}` wrapper the API puts around successful payloads.
#[derive(Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldValue;

    #[test]
    fn debug_output_hides_secrets() {
        let tokens = AuthTokens {
            access_token: "secret-access".to_string(),
            refresh_token: "secret-refresh".to_string(),
            expires: None,
        };
        let rendered = format!("{tokens:?}");
        assert!(!rendered.contains("secret"));

        let user = NewUser {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "Abcdef1!".to_string(),
        };
        assert!(!format!("{user:?}").contains("Abcdef1!"));
    }

    #[test]
    fn new_user_drops_validation_only_fields() {
        let data: FormData = [
            ("first_name", FieldValue::Text("John".to_string())),
            ("last_name", FieldValue::Text("Doe".to_string())),
            ("email", FieldValue::Text("john@example.com".to_string())),
            ("password", FieldValue::Text("Abcdef1!".to_string())),
            ("confirm_password", FieldValue::Text("Abcdef1!".to_string())),
            ("terms", FieldValue::Flag(true)),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        let body = serde_json::to_value(NewUser::from(&data)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "first_name": "John",
                "last_name": "Doe",
                "email": "john@example.com",
                "password": "Abcdef1!"
            })
        );
    }

    #[test]
    fn tokens_parse_from_login_payload() {
        let envelope: DataEnvelope<AuthTokens> = serde_json::from_str(
            r#"{"data":{"access_token":"a","refresh_token":"r","expires":900000}}"#,
        )
        .unwrap();

        assert_eq!(envelope.data.refresh_token, "r");
        assert_eq!(envelope.data.expires, Some(900_000));
    }
}
