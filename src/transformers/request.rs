//! Request transformation traits
//!
//! Converts the provider-agnostic `ChatRequest` into a provider JSON body.

use crate::error::LlmError;
use crate::types::ChatRequest;

/// Transform a unified chat request into a provider-specific payload
pub trait RequestTransformer: Send + Sync {
    /// Provider identifier (e.g., "openai", "anthropic")
    fn provider_id(&self) -> &str;

    /// Transform a unified ChatRequest into a provider-specific JSON body
    fn transform_chat(&self, req: &ChatRequest) -> Result<serde_json::Value, LlmError>;
}

/// Shared precondition for every provider body.
pub(crate) fn ensure_model(req: &ChatRequest) -> Result<(), LlmError> {
    if req.config.model.trim().is_empty() {
        return Err(LlmError::InvalidParameter(
            "Model must be specified".to_string(),
        ));
    }
    Ok(())
}
