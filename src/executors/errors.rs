//! Response classification
//!
//! Decides, from status and content type alone, whether an opened response
//! is streamed, extracted, or rendered as assistant-visible text. Auth,
//! billing and protocol problems never become `LlmError`s: they finish the
//! call like a normal reply.

use crate::config::ErrorMessages;
use crate::config::constants::{EVENT_STREAM_CONTENT_TYPE, PLAIN_TEXT_CONTENT_TYPE};
use crate::types::{ChatOutcome, FailureKind};
use crate::utils::format::pretty_object;

/// What to do with an opened response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDisposition {
    /// Decode the body as SSE frames
    EventStream,
    /// Decode the body as one JSON document
    JsonBody,
    /// `text/plain`: the body (or a fixed notice) is the reply
    PlainText,
    /// Any other status/content-type combination
    Unexpected,
}

/// Maps opened responses to caller-visible outcomes
#[derive(Debug, Clone, Copy)]
pub struct ErrorClassifier<'a> {
    messages: &'a ErrorMessages,
}

impl<'a> ErrorClassifier<'a> {
    pub const fn new(messages: &'a ErrorMessages) -> Self {
        Self { messages }
    }

    /// Classify a response from its status and `Content-Type` header.
    pub fn classify(
        status: u16,
        content_type: Option<&str>,
        streaming: bool,
    ) -> ResponseDisposition {
        let content_type = content_type.unwrap_or_default().trim().to_ascii_lowercase();
        if content_type.starts_with(PLAIN_TEXT_CONTENT_TYPE) {
            return ResponseDisposition::PlainText;
        }
        if streaming {
            if status == 200 && content_type.starts_with(EVENT_STREAM_CONTENT_TYPE) {
                return ResponseDisposition::EventStream;
            }
        } else if (200..300).contains(&status) {
            return ResponseDisposition::JsonBody;
        }
        ResponseDisposition::Unexpected
    }

    /// Outcome for a `text/plain` response.
    ///
    /// 401/402/406 are replaced by the fixed notices; anything else passes
    /// the body through. A successful status counts as a completed reply.
    pub fn plain_text_outcome(&self, status: u16, body: &str) -> ChatOutcome {
        if let Some(notice) = self.messages.for_status(status) {
            return ChatOutcome::Failed {
                kind: FailureKind::from_status(status),
                detail: notice.to_string(),
            };
        }
        if (200..300).contains(&status) {
            ChatOutcome::Completed {
                text: body.to_string(),
            }
        } else {
            ChatOutcome::Failed {
                kind: FailureKind::Protocol,
                detail: body.to_string(),
            }
        }
    }

    /// Outcome for an unexpected status or content type: the status notice
    /// (when there is one) followed by the formatted body, separated by a
    /// blank line.
    pub fn unexpected_outcome(&self, status: u16, body: &str) -> ChatOutcome {
        let detail = pretty_object(body);
        let parts: Vec<&str> = [self.messages.for_status(status), Some(detail.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect();

        ChatOutcome::Failed {
            kind: FailureKind::from_status(status),
            detail: parts.join("\n\n"),
        }
    }
}
