//! Response transformation traits
//!
//! Pulls the completed assistant text out of a non-streaming body.

use crate::error::LlmError;

/// Transform provider-specific responses into plain assistant text
pub trait ResponseTransformer: Send + Sync {
    /// Provider identifier
    fn provider_id(&self) -> &str;

    /// Extract the completed text from a provider chat response body.
    ///
    /// A well-formed body without text yields an empty string.
    fn transform_chat_response(&self, raw: &serde_json::Value) -> Result<String, LlmError>;
}
