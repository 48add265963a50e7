//! HTTP Headers Utility
//!
//! Header construction for relay requests.

use crate::config::constants::PROVIDER_HEADER;
use crate::error::LlmError;
use crate::types::ServiceProvider;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, LlmError> {
        let auth_value = format!("Bearer {}", token.trim());
        self.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).map_err(|e| {
                LlmError::ConfigurationError(format!("Invalid auth token format: {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add JSON content type and accept headers
    pub fn with_json(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, LlmError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                LlmError::ConfigurationError(format!("Invalid header value '{value}': {e}"))
            })?,
        );
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Headers for a relay chat request.
///
/// The routing code and bearer token are only attached when a token is
/// present; anonymous requests carry just the JSON headers.
pub fn relay_headers(
    auth_token: Option<&str>,
    service_provider: ServiceProvider,
) -> Result<HeaderMap, LlmError> {
    let mut builder = HttpHeaderBuilder::new()
        .with_json()
        .with_header("x-requested-with", "XMLHttpRequest")?;

    if let Some(token) = auth_token.filter(|t| !t.trim().is_empty()) {
        builder = builder
            .with_header(PROVIDER_HEADER, service_provider.code())?
            .with_bearer_auth(token)?;
    }

    Ok(builder.build())
}
