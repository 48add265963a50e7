//! Anthropic provider
//!
//! Speaks `v1/messages` with named SSE events.

pub mod client;
pub mod streaming;
pub mod transformers;

pub use client::AnthropicClient;
pub use streaming::AnthropicEventConverter;
pub use transformers::{
    AnthropicRequestTransformer, AnthropicResponseTransformer, NormalizedMessages,
};
