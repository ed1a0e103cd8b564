use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STUDIO_API_URL is not set")]
    MissingBaseUrl,
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("failed to build the http client: {0}")]
    HttpClient(String),
}

/// Client configuration. The API base URL is injected here, once, and flows
/// into the API client at construction — nothing reads it from a global.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the content backend, e.g. `https://cms.example.com/api/`.
    pub base_url: Url,
    /// Timeout applied to every request.
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Load configuration from environment variables, honoring a `.env`
    /// file when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let raw = env::var("STUDIO_API_URL").map_err(|_| ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
            name: "STUDIO_API_URL",
            reason: e.to_string(),
        })?;

        let request_timeout = match env::var("STUDIO_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse().map_err(|_| ConfigError::Invalid {
                name: "STUDIO_REQUEST_TIMEOUT_SECS",
                reason: format!("not a number of seconds: {raw}"),
            })?),
            Err(_) => Duration::from_secs(30),
        };

        Ok(Self {
            base_url,
            request_timeout,
        })
    }
}
