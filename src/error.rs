//! Error Handling Module
//!
//! Core error type for the library plus the conversions from the
//! third-party error types that cross our boundaries.
//!
//! Note that most provider failures (401/402/406, unexpected content types)
//! never become an `LlmError`: they are rendered as assistant-visible text
//! and delivered through the normal finish path. `LlmError` only reaches the
//! caller's error callback for failures that happen before a response is
//! observed, or when a configuration cannot be used at all.

use thiserror::Error;

/// Errors raised by the chat client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    /// Network-level failure (connect, TLS, reset, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// A response body could not be interpreted.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The event stream broke after it was opened.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// The client was built with unusable settings.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A model parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The local authorization precondition is not met.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The request did not open within the configured timeout.
    #[error("Request timed out: {0}")]
    TimeoutError(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for LlmError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}
