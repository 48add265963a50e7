//! SSE adapter over raw byte streams
//!
//! Thin extension trait so transport code can write
//! `response.bytes_stream().into_sse_stream()`. Line buffering and UTF-8
//! boundary handling come from `eventsource-stream`.

use eventsource_stream::{EventStream, Eventsource};
use futures_util::Stream;

/// Parsed SSE stream over a byte stream `S`
pub type SseStream<S> = EventStream<S>;

pub trait SseStreamExt: Sized {
    /// Decode the byte stream into SSE events.
    fn into_sse_stream(self) -> SseStream<Self>;
}

impl<S, B, E> SseStreamExt for S
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    fn into_sse_stream(self) -> SseStream<Self> {
        self.eventsource()
    }
}
