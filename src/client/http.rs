//! reqwest implementation of [`AuthBackend`].

use super::error::ClientError;
use super::types::{AuthTokens, DataEnvelope, LoginRequest, LogoutRequest, NewUser};
use super::AuthBackend;
use crate::settings::AuthConfig;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

/// Ask the API to return tokens in the response body rather than a cookie.
const TOKEN_MODE: &str = "json";

/// HTTP client for the auth API.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    config: AuthConfig,
    http: reqwest::Client,
}

impl HttpAuthClient {
    /// Creates a client for `config.base_url` with the configured request timeout.
    ///
    /// The config is validated first, so a hand-built [`AuthConfig`] with a
    /// bad URL fails here rather than on every request.
    pub fn new(config: AuthConfig) -> Result<Self, ClientError> {
        config
            .validate()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    async fn post<B>(&self, path: &str, body: &B) -> Result<reqwest::Response, ClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.config.endpoint(path);
        debug!(%url, "calling auth api");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let error = ClientError::from_response(status.as_u16(), &text);
        warn!(%url, status = status.as_u16(), %error, "auth api rejected request");
        Err(error)
    }
}

#[async_trait]
impl AuthBackend for HttpAuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ClientError> {
        let request = LoginRequest {
            email,
            password,
            mode: TOKEN_MODE,
        };
        let response = self.post("/auth/login", &request).await?;

        let envelope: DataEnvelope<AuthTokens> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn register(&self, user: &NewUser) -> Result<(), ClientError> {
        self.post("/users", user).await?;
        Ok(())
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), ClientError> {
        let request = LogoutRequest {
            refresh_token,
            mode: TOKEN_MODE,
        };
        self.post("/auth/logout", &request).await?;
        Ok(())
    }
}
