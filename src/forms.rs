//! Login, registration and logout flows.
//!
//! Each flow mounts a [`FormController`] with the standard schema and inputs,
//! then submits through an [`AuthBackend`].

use crate::client::{AuthBackend, AuthTokens, NewUser};
use crate::controller::{FormController, FormError, Outcome};
use crate::core::SubmitSuccess;
use crate::fields::FieldSpec;
use crate::schema::registry::{
    self, CONFIRM_PASSWORD, EMAIL, FIRST_NAME, LAST_NAME, PASSWORD, TERMS,
};
use tracing::{debug, info};

/// Where a successful registration sends the user.
pub const AFTER_REGISTER: &str = "/login";

/// Mount an empty login form.
pub fn login_form() -> FormController {
    let inputs = vec![
        FieldSpec::text(EMAIL)
            .label("Email")
            .placeholder("john@example.com")
            .with_asterisk(),
        FieldSpec::password(PASSWORD)
            .label("Password")
            .placeholder("Your password")
            .with_asterisk(),
    ];
    FormController::new(registry::login_schema(), inputs)
        .expect("Login inputs should match the login schema")
}

/// Mount an empty registration form.
pub fn register_form() -> FormController {
    let inputs = vec![
        FieldSpec::text(FIRST_NAME)
            .label("First name")
            .placeholder("John Doe")
            .with_asterisk(),
        FieldSpec::text(LAST_NAME)
            .label("Last name")
            .placeholder("John Doe")
            .with_asterisk(),
        FieldSpec::text(EMAIL)
            .label("Email")
            .placeholder("john@example.com")
            .with_asterisk(),
        FieldSpec::strong_password(PASSWORD)
            .label("Password")
            .placeholder("Your password")
            .with_asterisk(),
        FieldSpec::password(CONFIRM_PASSWORD)
            .label("Confirm Password")
            .placeholder("Your password")
            .with_asterisk(),
        FieldSpec::checkbox(TERMS).label("I accept terms and conditions"),
    ];
    FormController::new(registry::register_schema(), inputs)
        .expect("Register inputs should match the register schema")
}

/// Submit a login form. On success the state holds the token pair.
pub async fn submit_login<B>(form: &mut FormController, backend: &B) -> Outcome
where
    B: AuthBackend + ?Sized,
{
    form.submit(|data| async move {
        let email = data.text(EMAIL).unwrap_or_default();
        let password = data.text(PASSWORD).unwrap_or_default();
        debug!(%email, "logging in");
        let tokens = backend.login(email, password).await?;
        Ok(SubmitSuccess::Authenticated(tokens))
    })
    .await
}

/// Submit a registration form. Confirmation and terms are not sent.
pub async fn submit_registration<B>(form: &mut FormController, backend: &B) -> Outcome
where
    B: AuthBackend + ?Sized,
{
    form.submit(|data| async move {
        let user = NewUser::from(&data);
        debug!(email = %user.email, "registering user");
        backend.register(&user).await?;
        info!(email = %user.email, "user registered");
        Ok(SubmitSuccess::Registered {
            redirect_to: AFTER_REGISTER.to_string(),
        })
    })
    .await
}

/// Revoke the session the host holds.
///
/// Without a session nothing is sent.
pub async fn logout<B>(backend: &B, session: Option<&AuthTokens>) -> Result<SubmitSuccess, FormError>
where
    B: AuthBackend + ?Sized,
{
    let Some(tokens) = session else {
        debug!("logout requested without a session");
        return Err(FormError::NotAuthenticated);
    };

    backend.logout(&tokens.refresh_token).await?;
    info!("session revoked");
    Ok(SubmitSuccess::LoggedOut)
}
