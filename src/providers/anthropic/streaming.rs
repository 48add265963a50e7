//! Anthropic streaming frame decoding
//!
//! Frames are named SSE events. Only `content_block_delta` carries text and
//! only `message_stop` ends the stream. An `error` event is logged but is
//! not terminal; the server closes the connection afterwards and the close
//! ends the call.

use eventsource_stream::Event;
use serde::Deserialize;

use crate::error::LlmError;
use crate::transformers::stream::{FrameEvent, StreamEventParser};

/// Anthropic stream event structure
#[derive(Debug, Clone, Deserialize)]
struct AnthropicStreamEvent {
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    delta: Option<AnthropicDelta>,
    #[serde(default)]
    error: Option<AnthropicError>,
}

/// Anthropic delta structure
#[derive(Debug, Clone, Deserialize)]
struct AnthropicDelta {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AnthropicError {
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Anthropic event converter
#[derive(Debug, Clone, Default)]
pub struct AnthropicEventConverter;

impl AnthropicEventConverter {
    pub fn new() -> Self {
        Self
    }
}

impl StreamEventParser for AnthropicEventConverter {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn parse_frame(&self, event: &Event) -> Result<FrameEvent, LlmError> {
        let data = event.data.trim();
        let parsed: AnthropicStreamEvent = serde_json::from_str(data).map_err(|e| {
            LlmError::ParseError(format!(
                "Failed to parse Anthropic event: {e}. Raw data: {data}"
            ))
        })?;

        // The SSE event name is authoritative; fall back to the payload type.
        let name = match event.event.trim() {
            "" | "message" => parsed.r#type.as_deref().unwrap_or_default(),
            name => name,
        };

        match name {
            "content_block_delta" => Ok(parsed
                .delta
                .and_then(|d| d.text)
                .filter(|text| !text.is_empty())
                .map_or(FrameEvent::Ignored, FrameEvent::Delta)),
            "message_stop" => Ok(FrameEvent::Finished),
            "message_start" | "content_block_start" | "content_block_stop" | "message_delta"
            | "ping" => Ok(FrameEvent::Ignored),
            "error" => {
                let error = parsed.error.as_ref();
                tracing::warn!(
                    error_type = error.and_then(|e| e.error_type.as_deref()).unwrap_or("unknown"),
                    error_message = error.and_then(|e| e.message.as_deref()).unwrap_or_default(),
                    "Anthropic stream error event"
                );
                Ok(FrameEvent::Ignored)
            }
            other => {
                tracing::debug!(event = other, "Unknown Anthropic event, ignored");
                Ok(FrameEvent::Ignored)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(event: &str, data: &str) -> Event {
        Event {
            event: event.to_string(),
            data: data.to_string(),
            id: String::new(),
            retry: None,
        }
    }

    #[test]
    fn text_delta_is_extracted() {
        let event = named(
            "content_block_delta",
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#,
        );
        assert_eq!(
            AnthropicEventConverter.parse_frame(&event).unwrap(),
            FrameEvent::Delta("Hi".to_string())
        );
    }

    #[test]
    fn message_stop_finishes() {
        let event = named("message_stop", r#"{"type":"message_stop"}"#);
        assert_eq!(
            AnthropicEventConverter.parse_frame(&event).unwrap(),
            FrameEvent::Finished
        );
    }

    #[test]
    fn bookkeeping_events_are_no_ops() {
        for name in [
            "message_start",
            "content_block_start",
            "content_block_stop",
            "message_delta",
            "ping",
        ] {
            let event = named(name, &format!(r#"{{"type":"{name}"}}"#));
            assert_eq!(
                AnthropicEventConverter.parse_frame(&event).unwrap(),
                FrameEvent::Ignored,
                "{name}"
            );
        }
    }

    #[test]
    fn error_event_is_not_terminal() {
        let event = named(
            "error",
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
        );
        assert_eq!(
            AnthropicEventConverter.parse_frame(&event).unwrap(),
            FrameEvent::Ignored
        );
    }

    #[test]
    fn unnamed_frame_uses_payload_type() {
        let event = named("", r#"{"type":"message_stop"}"#);
        assert_eq!(
            AnthropicEventConverter.parse_frame(&event).unwrap(),
            FrameEvent::Finished
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        let event = named("content_block_delta", "{\"delta\":");
        assert!(matches!(
            AnthropicEventConverter.parse_frame(&event),
            Err(LlmError::ParseError(_))
        ));
    }
}
