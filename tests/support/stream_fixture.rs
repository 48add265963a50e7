//! Test fixtures utilities: load SSE streaming chunks and drive frame parsers

use chatrelay::transformers::{FrameEvent, StreamEventParser};
use chatrelay::utils::SseStreamExt;
use futures_util::StreamExt;
use std::io;

/// Load an `.sse` fixture file and split it into SSE chunks (separated by
/// blank lines), returning a byte stream
pub fn load_sse_fixture_as_bytes(path: &str) -> io::Result<Vec<Result<Vec<u8>, io::Error>>> {
    let raw = std::fs::read_to_string(path)?;
    // Normalize line endings
    let normalized = raw.replace("\r\n", "\n");
    let mut out = Vec::new();
    for chunk in normalized.split("\n\n") {
        let s = chunk.trim_end_matches('\n');
        if s.is_empty() {
            continue;
        }
        // Restore SSE event blank line terminator
        let mut owned = String::from(s);
        owned.push_str("\n\n");
        out.push(Ok(owned.into_bytes()));
    }
    Ok(out)
}

/// Raw fixture body, as a server would send it
pub fn load_sse_fixture(path: &str) -> String {
    std::fs::read_to_string(path).expect("load fixture")
}

/// Parsed frames plus the number of frames the parser rejected
pub struct ParsedFixture {
    pub frames: Vec<FrameEvent>,
    pub malformed: usize,
}

impl ParsedFixture {
    pub fn text(&self) -> String {
        self.frames
            .iter()
            .filter_map(|f| match f {
                FrameEvent::Delta(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Run every SSE event of `bytes` through `parser`
pub async fn collect_frames(
    bytes: Vec<Result<Vec<u8>, io::Error>>,
    parser: &dyn StreamEventParser,
) -> ParsedFixture {
    let mut sse_stream = futures_util::stream::iter(bytes).into_sse_stream();
    let mut parsed = ParsedFixture {
        frames: Vec::new(),
        malformed: 0,
    };
    while let Some(item) = sse_stream.next().await {
        let event = item.expect("valid SSE event");
        match parser.parse_frame(&event) {
            Ok(frame) => parsed.frames.push(frame),
            Err(_) => parsed.malformed += 1,
        }
    }
    parsed
}
