//! Capability traits

use async_trait::async_trait;

use crate::callbacks::ChatCallbacks;
use crate::config::ChatOptions;
use crate::types::{ChatMessage, ChatOutcome};

/// The single chat contract every provider client implements.
#[async_trait]
pub trait ChatCapability: Send + Sync {
    /// Canonical provider id (e.g., "openai", "anthropic")
    fn provider_id(&self) -> &'static str;

    /// Run one chat call. Progress and the terminal notification arrive
    /// through `callbacks`; the same terminal result is also returned.
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
        callbacks: &mut dyn ChatCallbacks,
    ) -> ChatOutcome;
}
