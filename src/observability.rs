//! Observability
//!
//! Subscriber setup plus the request/response tracing helpers used by the
//! executor. Credentials are masked before anything reaches a log line.

use std::time::Instant;

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Subscriber settings for [`init_tracing`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl TracingConfig {
    pub fn debug() -> Self {
        Self {
            level: "chatrelay=debug".to_string(),
            ..Self::default()
        }
    }

    pub fn json() -> Self {
        Self {
            json: true,
            ..Self::default()
        }
    }
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over `config.level`. Returns `false` when a global
/// subscriber was already installed, so calling this twice is harmless.
pub fn init_tracing(config: &TracingConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.is_ok()
}

/// Mask a credential for logging: `Bearer abcd...wxyz`.
pub fn mask_sensitive_value(value: &str) -> String {
    if let Some(token) = value.strip_prefix("Bearer ") {
        return format!("Bearer {}", mask_middle(token, 4));
    }
    mask_middle(value, 4)
}

fn mask_middle(value: &str, keep: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= keep * 2 {
        return "***".to_string();
    }
    let head: String = chars[..keep].iter().collect();
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{head}...{tail}")
}

fn is_sensitive_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    ["authorization", "key", "token", "cookie"]
        .iter()
        .any(|needle| name.contains(needle))
}

/// Render headers as a JSON object with credentials masked.
pub fn format_headers_for_logging(headers: &HeaderMap) -> String {
    let map: std::collections::BTreeMap<&str, String> = headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<invalid>");
            let value = if is_sensitive_header(name.as_str()) {
                mask_sensitive_value(value)
            } else {
                value.to_string()
            };
            (name.as_str(), value)
        })
        .collect();
    serde_json::to_string(&map).unwrap_or_else(|_| format!("{map:?}"))
}

/// Per-call request tracing
#[derive(Debug, Clone)]
pub struct ProviderTracer {
    provider: String,
    model: String,
    started: Instant,
}

impl ProviderTracer {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            started: Instant::now(),
        }
    }

    pub fn trace_request_start(&self, url: &str, stream: bool) {
        info!(
            provider = %self.provider,
            model = %self.model,
            url = %url,
            stream,
            "Request started"
        );
    }

    pub fn trace_request_details(&self, headers: &HeaderMap, body: &serde_json::Value) {
        debug!(
            provider = %self.provider,
            model = %self.model,
            request_headers = %format_headers_for_logging(headers),
            request_body = %body,
            "Request details"
        );
    }

    pub fn trace_response_open(&self, status: u16, content_type: Option<&str>) {
        debug!(
            provider = %self.provider,
            status,
            content_type = content_type.unwrap_or_default(),
            duration_ms = self.started.elapsed().as_millis() as u64,
            "Response opened"
        );
    }

    pub fn trace_frame(&self, event: &str, data: &str) {
        debug!(provider = %self.provider, event, data, "Stream frame");
    }

    pub fn trace_malformed_frame(&self, error: &dyn std::fmt::Display, data: &str) {
        warn!(provider = %self.provider, error = %error, data, "Skipping malformed stream frame");
    }

    pub fn trace_outcome(&self, outcome: &str, text_len: usize) {
        info!(
            provider = %self.provider,
            model = %self.model,
            outcome,
            text_len,
            duration_ms = self.started.elapsed().as_millis() as u64,
            "Chat finished"
        );
    }

    pub fn trace_error(&self, error: &dyn std::fmt::Display) {
        warn!(
            provider = %self.provider,
            model = %self.model,
            error = %error,
            duration_ms = self.started.elapsed().as_millis() as u64,
            "Chat failed"
        );
    }
}
