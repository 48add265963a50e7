//! Transformers for Anthropic Messages
//!
//! The Messages API wants the system prompt as a top-level string and no
//! two consecutive messages with the same role. Normalization enforces
//! both before the request body is assembled.

use serde_json::{Value, json};

use crate::config::constants::MIN_MAX_TOKENS;
use crate::error::LlmError;
use crate::transformers::request::{RequestTransformer, ensure_model};
use crate::transformers::response::ResponseTransformer;
use crate::types::{ChatMessage, ChatRequest, ContentPart, ImageSource, MessageContent, MessageRole};

/// Anthropic message array plus the extracted system prompt
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMessages {
    pub messages: Vec<Value>,
    pub system: Option<String>,
}

/// Convert messages into the Anthropic shape.
///
/// Scans from the newest message backwards. System messages are pulled out
/// and joined with `\n` in chronological order. For the rest, a message
/// whose role equals the role of the most recently kept one is dropped, so
/// of two adjacent same-role messages only the later survives.
pub fn normalize_messages(messages: &[ChatMessage], vision: bool) -> NormalizedMessages {
    let mut kept = Vec::with_capacity(messages.len());
    let mut system = Vec::new();
    let mut last_role: Option<MessageRole> = None;

    for message in messages.iter().rev() {
        if message.role == MessageRole::System {
            system.push(message.text());
            continue;
        }
        if last_role == Some(message.role) {
            continue;
        }
        last_role = Some(message.role);
        kept.push(message);
    }

    kept.reverse();
    system.reverse();
    system.retain(|text| !text.is_empty());

    NormalizedMessages {
        messages: kept
            .into_iter()
            .map(|message| convert_message(message, vision))
            .collect(),
        system: (!system.is_empty()).then(|| system.join("\n")),
    }
}

fn convert_message(message: &ChatMessage, vision: bool) -> Value {
    let content = match &message.content {
        MessageContent::MultiModal(parts) if vision => {
            Value::Array(parts.iter().map(convert_part).collect())
        }
        content => Value::String(content.text_only()),
    };
    json!({ "role": message.role.as_str(), "content": content })
}

fn convert_part(part: &ContentPart) -> Value {
    match part {
        ContentPart::Text { text } => json!({ "type": "text", "text": text }),
        ContentPart::Image {
            source: ImageSource::Url { url },
        } => json!({
            "type": "image",
            "source": { "type": "url", "url": url },
        }),
        ContentPart::Image {
            source: ImageSource::Base64 { media_type, data },
        } => json!({
            "type": "image",
            "source": {
                "type": "base64",
                "media_type": media_type,
                "data": strip_data_url_prefix(data),
            },
        }),
    }
}

/// Drop everything up to and including the first comma.
fn strip_data_url_prefix(data: &str) -> &str {
    data.split_once(',').map_or(data, |(_, payload)| payload)
}

/// Request transformer for Anthropic
#[derive(Debug, Clone, Default)]
pub struct AnthropicRequestTransformer;

impl RequestTransformer for AnthropicRequestTransformer {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn transform_chat(&self, req: &ChatRequest) -> Result<Value, LlmError> {
        ensure_model(req)?;
        let normalized = normalize_messages(&req.messages, req.vision);

        let mut body = json!({
            "model": req.config.model,
            "messages": normalized.messages,
            "max_tokens": req.config.max_tokens.max(MIN_MAX_TOKENS),
            "stream": req.config.stream,
        });
        if let Some(system) = normalized.system {
            body["system"] = json!(system);
        }
        Ok(body)
    }
}

/// Response transformer for Anthropic
#[derive(Debug, Clone, Default)]
pub struct AnthropicResponseTransformer;

impl ResponseTransformer for AnthropicResponseTransformer {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn transform_chat_response(&self, raw: &Value) -> Result<String, LlmError> {
        if !raw.is_object() {
            return Err(LlmError::ParseError(format!(
                "Invalid Anthropic response: expected an object, got {raw}"
            )));
        }
        Ok(raw
            .pointer("/content/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelConfig;

    fn roles(normalized: &NormalizedMessages) -> Vec<&str> {
        normalized
            .messages
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn earlier_duplicate_role_is_dropped() {
        let out = normalize_messages(
            &[
                ChatMessage::system("S"),
                ChatMessage::user("A"),
                ChatMessage::user("B"),
            ],
            false,
        );
        assert_eq!(out.system.as_deref(), Some("S"));
        assert_eq!(out.messages, vec![json!({"role": "user", "content": "B"})]);
    }

    #[test]
    fn system_text_keeps_chronological_order() {
        let out = normalize_messages(
            &[
                ChatMessage::system("first"),
                ChatMessage::user("q1"),
                ChatMessage::system("second"),
                ChatMessage::assistant("a1"),
                ChatMessage::system("third"),
                ChatMessage::user("q2"),
            ],
            false,
        );
        assert_eq!(out.system.as_deref(), Some("first\nsecond\nthird"));
        assert_eq!(roles(&out), ["user", "assistant", "user"]);
    }

    #[test]
    fn output_never_has_adjacent_roles_or_system_entries() {
        use MessageRole::*;
        let patterns: [&[MessageRole]; 5] = [
            &[User, User, User],
            &[System, Assistant, Assistant, User, System, User],
            &[User, Assistant, User, Assistant],
            &[Assistant, System, Assistant, User, User, System],
            &[System, System],
        ];
        for pattern in patterns {
            let messages: Vec<_> = pattern
                .iter()
                .enumerate()
                .map(|(i, role)| ChatMessage::new(*role, format!("m{i}")))
                .collect();
            let out = normalize_messages(&messages, false);
            let roles = roles(&out);
            assert!(!roles.contains(&"system"), "{pattern:?}");
            assert!(roles.windows(2).all(|w| w[0] != w[1]), "{pattern:?}");
        }
    }

    #[test]
    fn no_system_messages_means_no_system_text() {
        let out = normalize_messages(&[ChatMessage::user("hi")], false);
        assert!(out.system.is_none());
    }

    #[test]
    fn vision_images_are_converted() {
        let message = ChatMessage::user(vec![
            ContentPart::text("describe"),
            ContentPart::image_base64("image/png", "data:image/png;base64,iVBOR"),
            ContentPart::image_url("https://img.example/cat.jpg"),
        ]);
        let out = normalize_messages(&[message], true);
        let parts = out.messages[0]["content"].as_array().unwrap();
        assert_eq!(parts[0], json!({"type": "text", "text": "describe"}));
        assert_eq!(
            parts[1],
            json!({
                "type": "image",
                "source": {"type": "base64", "media_type": "image/png", "data": "iVBOR"}
            })
        );
        assert_eq!(parts[2]["source"]["url"], "https://img.example/cat.jpg");
    }

    #[test]
    fn text_models_drop_image_parts() {
        let message = ChatMessage::user(vec![
            ContentPart::text("describe"),
            ContentPart::image_url("https://img.example/cat.jpg"),
        ]);
        let out = normalize_messages(&[message], false);
        assert_eq!(out.messages[0]["content"], "describe");
    }

    #[test]
    fn payload_without_comma_is_kept_whole() {
        assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
        assert_eq!(strip_data_url_prefix("data:x;base64,QU,JD"), "QU,JD");
    }

    #[test]
    fn max_tokens_always_has_floor() {
        let mut config = ModelConfig::default().with_model("claude-3-haiku-20240307");
        config.max_tokens = 256;
        let req = ChatRequest::new(
            vec![ChatMessage::system("be nice"), ChatMessage::user("hi")],
            config,
        );
        let body = AnthropicRequestTransformer.transform_chat(&req).unwrap();
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["system"], "be nice");
        assert_eq!(body["stream"], true);
        assert!(body.get("temperature").is_none());

        let mut req = req;
        req.config.max_tokens = 8000;
        let body = AnthropicRequestTransformer.transform_chat(&req).unwrap();
        assert_eq!(body["max_tokens"], 8000);
    }

    #[test]
    fn system_field_is_omitted_when_absent() {
        let req = ChatRequest::new(vec![ChatMessage::user("hi")], ModelConfig::default());
        let body = AnthropicRequestTransformer.transform_chat(&req).unwrap();
        assert!(body.get("system").is_none());
    }

    #[test]
    fn extracts_first_content_block() {
        let raw = json!({"content":[{"type":"text","text":"Hi there"}],"stop_reason":"end_turn"});
        assert_eq!(
            AnthropicResponseTransformer.transform_chat_response(&raw).unwrap(),
            "Hi there"
        );
    }
}
