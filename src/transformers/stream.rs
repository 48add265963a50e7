//! Stream frame transformation traits
//!
//! Each provider decodes its own SSE grammar one frame at a time. Frames
//! are independent: a frame that fails to decode is reported as an error
//! and the executor skips it without ending the stream.

use crate::error::LlmError;
use eventsource_stream::Event;

/// What a single decoded frame means for the call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    /// Text to append to the pending buffer
    Delta(String),
    /// Terminal frame
    Finished,
    /// Valid frame with no effect on the text
    Ignored,
}

/// Decode provider SSE frames
pub trait StreamEventParser: Send + Sync {
    /// Provider identifier
    fn provider_id(&self) -> &str;

    /// Decode one frame. `Err` means the frame was malformed.
    fn parse_frame(&self, event: &Event) -> Result<FrameEvent, LlmError>;
}
