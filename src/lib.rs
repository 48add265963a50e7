//! # chatrelay - streaming chat client for OpenAI- and Anthropic-style relays
//!
//! One uniform `chat` contract over two wire protocols. Text arrives as
//! server-sent events, is buffered, and is released to the caller at a
//! paced rate; every call ends in exactly one terminal notification.
//!
//! ## Features
//!
//! - **One contract**: `ChatCapability::chat(messages, options, callbacks)` for every provider.
//! - **Layered config**: base defaults < session override < per-call model id.
//! - **Paced output**: an animator releases `max(1, round(pending / 60))` chars per tick.
//! - **Exactly-once finish**: completion, cancellation, timeout and classified
//!   relay errors all end in a single `on_finish`.
//! - **Auth and billing notices as text**: 401/402/406 become assistant-visible replies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatrelay::prelude::*;
//!
//! struct Printer;
//!
//! impl ChatCallbacks for Printer {
//!     fn on_update(&mut self, _full: &str, delta: &str) {
//!         print!("{delta}");
//!     }
//!     fn on_finish(&mut self, text: &str) {
//!         println!("\n[{} chars]", text.chars().count());
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LlmError> {
//!     let client = ChatClient::builder()
//!         .provider(ModelProvider::Claude)
//!         .endpoint("https://relay.example.com")
//!         .auth_token("your-token")
//!         .build()?;
//!
//!     let outcome = client
//!         .chat(
//!             vec![ChatMessage::user("Hello!")],
//!             ChatOptions::new("claude-3-haiku-20240307"),
//!             &mut Printer,
//!         )
//!         .await;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod callbacks;
pub mod client;
pub mod config;
pub mod error;
pub mod executors;
pub mod observability;
pub mod providers;
pub mod streaming;
pub mod traits;
pub mod transformers;
pub mod types;
pub mod utils;

pub use callbacks::{ChannelCallbacks, ChatCallbacks, ChatEvent};
pub use client::{ChatClient, ChatClientBuilder, ProviderClient};
pub use error::LlmError;
pub use traits::ChatCapability;
pub use utils::CancelHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::callbacks::{ChannelCallbacks, ChatCallbacks, ChatEvent};
    pub use crate::client::{ChatClient, ChatClientBuilder};
    pub use crate::config::{
        AccessConfig, ChatOptions, ErrorMessages, ModelConfig, ModelConfigOverride,
    };
    pub use crate::error::LlmError;
    pub use crate::observability::{TracingConfig, init_tracing};
    pub use crate::streaming::AnimationConfig;
    pub use crate::traits::ChatCapability;
    pub use crate::types::{
        AbortReason, ChatMessage, ChatOutcome, ContentPart, FailureKind, ImageSource,
        MessageContent, MessageRole, ModelProvider, ServiceProvider,
    };
    pub use crate::utils::CancelHandle;
}
