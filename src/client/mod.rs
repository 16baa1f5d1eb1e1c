//! Remote auth API access.
//!
//! [`AuthBackend`] is the seam between the submission flows and the network.
//! [`HttpAuthClient`] talks to a Directus-compatible API; tests substitute an
//! in-memory implementation. Calls are pass-through: no retries, no backoff.

mod error;
mod http;
mod types;

pub use error::ClientError;
pub use http::HttpAuthClient;
pub use types::{AuthTokens, NewUser};

use async_trait::async_trait;

/// Operations the forms need from the auth API.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a token pair.
    async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ClientError>;

    /// Create a user account.
    async fn register(&self, user: &NewUser) -> Result<(), ClientError>;

    /// Revoke a refresh token.
    async fn logout(&self, refresh_token: &str) -> Result<(), ClientError>;
}
