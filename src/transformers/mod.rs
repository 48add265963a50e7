//! Transformers layer
//!
//! Traits for the three provider-specific conversions a chat call needs:
//! request body construction, non-streaming response extraction, and
//! per-frame stream decoding. Providers implement them; the executor only
//! talks to the traits.

pub mod request;
pub mod response;
pub mod stream;

pub use request::RequestTransformer;
pub use response::ResponseTransformer;
pub use stream::{FrameEvent, StreamEventParser};
