//! Auth client configuration.
//!
//! Loaded from an optional `authform.toml` followed by environment overrides
//! (`AUTHFORM_BASE_URL`, `AUTHFORM_REQUEST_TIMEOUT_SECS`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Where the auth API lives and how long to wait for it.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// API root, e.g. `https://cms.example.com`.
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl AuthConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from `authform.toml` (if present) with `AUTHFORM_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("authform").required(false))
            .add_source(Environment::with_prefix("AUTHFORM").try_parsing(true))
            .build()?;
        Self::from_config(settings)
    }

    /// Deserialize and validate an already-assembled [`Config`].
    pub fn from_config(settings: Config) -> Result<Self, ConfigError> {
        let config: AuthConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Check the base URL scheme and the timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Message("base_url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Message(format!(
                "base_url must start with http:// or https:// (got '{url}')"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(source: &str) -> Result<AuthConfig, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;
        AuthConfig::from_config(settings)
    }

    #[test]
    fn loads_base_url_and_default_timeout() {
        let config = from_toml(r#"base_url = "https://cms.example.com""#).unwrap();

        assert_eq!(config.base_url, "https://cms.example.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn rejects_non_http_url() {
        let result = from_toml(r#"base_url = "cms.example.com""#);
        assert!(matches!(result, Err(ConfigError::Message(_))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = from_toml(
            r#"
            base_url = "https://cms.example.com"
            request_timeout_secs = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Message(_))));
    }

    #[test]
    fn missing_base_url_fails() {
        assert!(from_toml("request_timeout_secs = 5").is_err());
    }

    #[test]
    fn hand_built_config_is_checked_on_validate() {
        assert!(AuthConfig::new("https://cms.example.com").validate().is_ok());
        assert!(matches!(
            AuthConfig::new("cms.example.com").validate(),
            Err(ConfigError::Message(_))
        ));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = AuthConfig::new("https://cms.example.com/");
        assert_eq!(config.endpoint("/auth/login"), "https://cms.example.com/auth/login");
        assert_eq!(config.endpoint("users"), "https://cms.example.com/users");
    }
}
