//! Executors Layer
//!
//! HTTP orchestration that wires the transformers to a provider endpoint:
//! transport, cancellation, timeout and response classification.

pub mod chat;
pub mod errors;

pub use chat::{ChatExecutor, HttpChatExecutor};
pub use errors::{ErrorClassifier, ResponseDisposition};
