//! OpenAI-compatible provider
//!
//! Speaks `v1/chat/completions`. Requests for non-`gpt` models are tagged
//! for the secondary compatible backend via the provider header.

pub mod client;
pub mod streaming;
pub mod transformers;

pub use client::OpenAiClient;
pub use streaming::OpenAiEventConverter;
pub use transformers::{OpenAiRequestTransformer, OpenAiResponseTransformer};
