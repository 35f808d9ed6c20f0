use std::env;

use crate::error::ClientError;

const SERVER_URL_VAR: &str = "ROOK_SERVER_URL";
const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Where the game server lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Build a config against an explicit base URL. A trailing slash is
    /// stripped so request paths can always start with `/`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Read the server URL from `ROOK_SERVER_URL`, falling back to the
    /// default local server address.
    pub fn from_env() -> Result<Self, ClientError> {
        let url = match env::var(SERVER_URL_VAR) {
            Ok(url) if url.trim().is_empty() => {
                return Err(ClientError::config(format!(
                    "Environment variable '{SERVER_URL_VAR}' is set but empty"
                )))
            }
            Ok(url) => url,
            Err(_) => DEFAULT_SERVER_URL.to_string(),
        };
        Ok(Self::new(url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
