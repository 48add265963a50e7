//! OpenAI streaming frame decoding
//!
//! Every frame is `data: {"choices":[{"delta":{"content":"..."}}]}`; the
//! stream ends with the literal `data: [DONE]`.

use eventsource_stream::Event;
use serde::Deserialize;

use crate::config::constants::DONE_MARKER;
use crate::error::LlmError;
use crate::transformers::stream::{FrameEvent, StreamEventParser};

/// OpenAI stream event structure
#[derive(Debug, Clone, Deserialize)]
struct OpenAiStreamEvent {
    #[serde(default)]
    choices: Vec<OpenAiStreamChoice>,
}

/// OpenAI stream choice
#[derive(Debug, Clone, Deserialize)]
struct OpenAiStreamChoice {
    #[serde(default)]
    delta: Option<OpenAiStreamDelta>,
}

/// OpenAI stream delta
#[derive(Debug, Clone, Deserialize)]
struct OpenAiStreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI event converter
#[derive(Debug, Clone, Default)]
pub struct OpenAiEventConverter;

impl OpenAiEventConverter {
    pub fn new() -> Self {
        Self
    }
}

impl StreamEventParser for OpenAiEventConverter {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn parse_frame(&self, event: &Event) -> Result<FrameEvent, LlmError> {
        let data = event.data.trim();
        if data == DONE_MARKER {
            return Ok(FrameEvent::Finished);
        }
        if data.is_empty() {
            return Ok(FrameEvent::Ignored);
        }

        let chunk: OpenAiStreamEvent = serde_json::from_str(data).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse OpenAI event: {e}. Raw data: {data}"))
        })?;

        let delta = chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .filter(|content| !content.is_empty());

        Ok(delta.map_or(FrameEvent::Ignored, FrameEvent::Delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(data: &str) -> Event {
        Event {
            event: "message".to_string(),
            data: data.to_string(),
            id: String::new(),
            retry: None,
        }
    }

    #[test]
    fn content_delta_is_extracted() {
        let event = frame(r#"{"choices":[{"index":0,"delta":{"content":"Hel"}}]}"#);
        assert_eq!(
            OpenAiEventConverter.parse_frame(&event).unwrap(),
            FrameEvent::Delta("Hel".to_string())
        );
    }

    #[test]
    fn done_marker_finishes() {
        assert_eq!(
            OpenAiEventConverter.parse_frame(&frame("[DONE]")).unwrap(),
            FrameEvent::Finished
        );
    }

    #[test]
    fn role_only_and_empty_deltas_are_ignored() {
        let role = frame(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#);
        let empty = frame(r#"{"choices":[{"delta":{"content":""}}]}"#);
        let none = frame(r#"{"choices":[{"delta":{"content":null},"finish_reason":"stop"}]}"#);
        for event in [role, empty, none, frame(r#"{"choices":[]}"#)] {
            assert_eq!(
                OpenAiEventConverter.parse_frame(&event).unwrap(),
                FrameEvent::Ignored
            );
        }
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = OpenAiEventConverter
            .parse_frame(&frame("{not json"))
            .unwrap_err();
        assert!(matches!(err, LlmError::ParseError(_)));
    }
}
