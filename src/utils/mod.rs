//! Utility modules
//!
//! Small helpers shared by the transport and the provider clients.

pub mod cancel;
pub mod format;
pub mod http_headers;
pub mod sse_stream;
pub mod url;
pub mod vision;

pub use cancel::CancelHandle;
pub use sse_stream::{SseStream, SseStreamExt};
