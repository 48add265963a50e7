//! Access configuration
//!
//! Endpoint and credentials of the relay. The token is kept in a
//! `SecretString` so it never shows up in `Debug` output or logs.

use secrecy::{ExposeSecret, SecretString};

use super::constants::{ENV_AUTH_TOKEN, ENV_BASE_URL};

/// Relay endpoint + access token
#[derive(Clone, Default)]
pub struct AccessConfig {
    endpoint: String,
    auth_token: Option<SecretString>,
}

impl std::fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessConfig")
            .field("endpoint", &self.endpoint)
            .field("has_auth_token", &self.has_auth_token())
            .finish()
    }
}

impl AccessConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token: None,
        }
    }

    /// Read `CHATRELAY_BASE_URL` / `CHATRELAY_AUTH_TOKEN`; missing values stay empty.
    pub fn from_env() -> Self {
        let endpoint = std::env::var(ENV_BASE_URL).unwrap_or_default();
        let token = std::env::var(ENV_AUTH_TOKEN).ok();
        let mut config = Self::new(endpoint);
        if let Some(token) = token {
            config.set_auth_token(token);
        }
        config
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.set_auth_token(token);
        self
    }

    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.auth_token = if token.trim().is_empty() {
            None
        } else {
            Some(SecretString::from(token))
        };
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = endpoint.into();
    }

    pub fn clear_auth_token(&mut self) {
        self.auth_token = None;
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_auth_token(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Token with surrounding whitespace removed, if one is set.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token
            .as_ref()
            .map(|t| t.expose_secret().trim())
            .filter(|t| !t.is_empty())
    }

    /// Both the endpoint and the token are configured.
    pub fn is_authorized(&self) -> bool {
        !self.endpoint.trim().is_empty() && self.auth_token().is_some()
    }

    /// Normalized base URL (see [`crate::utils::url::normalize_base_url`]).
    pub fn base_url(&self) -> String {
        crate::utils::url::normalize_base_url(&self.endpoint)
    }

    /// Full URL for a protocol path such as `v1/messages`.
    pub fn path(&self, path: &str) -> String {
        crate::utils::url::join_url(&self.base_url(), path)
    }
}
