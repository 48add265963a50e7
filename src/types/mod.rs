//! Core types shared by every provider

pub mod chat;
pub mod outcome;
pub mod provider;

pub use chat::*;
pub use outcome::*;
pub use provider::*;

pub use crate::config::model::{ChatOptions, ModelConfig, ModelConfigOverride};

/// Provider-agnostic request handed to the transformers: messages plus the
/// config snapshot resolved at call start.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub config: ModelConfig,
    /// Whether the target model accepts image parts
    pub vision: bool,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>, config: ModelConfig) -> Self {
        let vision = crate::utils::vision::is_vision_model(&config.model);
        Self {
            messages,
            config,
            vision,
        }
    }

    pub const fn stream(&self) -> bool {
        self.config.stream
    }
}
