//! Transformers for OpenAI-compatible chat completions
//!
//! Message normalization, request body construction and non-streaming
//! text extraction for the `v1/chat/completions` wire format.

use serde_json::{Value, json};

use crate::config::constants::MIN_MAX_TOKENS;
use crate::error::LlmError;
use crate::transformers::request::{RequestTransformer, ensure_model};
use crate::transformers::response::ResponseTransformer;
use crate::types::{ChatMessage, ChatRequest, ContentPart, ImageSource, MessageContent};

/// Convert messages into OpenAI `{role, content}` entries.
///
/// Roles pass through unchanged. Without vision support every message is
/// flattened to its text portions; with it, multimodal content becomes an
/// array of `text` / `image_url` parts.
pub fn normalize_messages(messages: &[ChatMessage], vision: bool) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            let content = match &message.content {
                MessageContent::MultiModal(parts) if vision => {
                    Value::Array(parts.iter().map(convert_part).collect())
                }
                content => Value::String(content.text_only()),
            };
            json!({ "role": message.role.as_str(), "content": content })
        })
        .collect()
}

fn convert_part(part: &ContentPart) -> Value {
    match part {
        ContentPart::Text { text } => json!({ "type": "text", "text": text }),
        ContentPart::Image { source } => {
            let url = match source {
                ImageSource::Url { url } => url.clone(),
                ImageSource::Base64 { data, .. } if data.starts_with("data:") => data.clone(),
                ImageSource::Base64 { media_type, data } => {
                    format!("data:{media_type};base64,{data}")
                }
            };
            json!({ "type": "image_url", "image_url": { "url": url } })
        }
    }
}

/// Request transformer for OpenAI-compatible backends
#[derive(Debug, Clone, Default)]
pub struct OpenAiRequestTransformer;

impl RequestTransformer for OpenAiRequestTransformer {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn transform_chat(&self, req: &ChatRequest) -> Result<Value, LlmError> {
        ensure_model(req)?;
        let config = &req.config;

        let mut body = json!({
            "model": config.model,
            "messages": normalize_messages(&req.messages, req.vision),
            "stream": config.stream,
            "temperature": config.temperature,
            "top_p": config.top_p,
            "presence_penalty": config.presence_penalty,
            "frequency_penalty": config.frequency_penalty,
        });
        // Vision replies get truncated with small budgets.
        if req.vision {
            body["max_tokens"] = json!(config.max_tokens.max(MIN_MAX_TOKENS));
        }
        Ok(body)
    }
}

/// Response transformer for OpenAI-compatible backends
#[derive(Debug, Clone, Default)]
pub struct OpenAiResponseTransformer;

impl ResponseTransformer for OpenAiResponseTransformer {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn transform_chat_response(&self, raw: &Value) -> Result<String, LlmError> {
        if !raw.is_object() {
            return Err(LlmError::ParseError(format!(
                "Invalid OpenAI response: expected an object, got {raw}"
            )));
        }
        Ok(raw
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelConfig;

    fn request(messages: Vec<ChatMessage>, model: &str) -> ChatRequest {
        ChatRequest::new(messages, ModelConfig::default().with_model(model))
    }

    fn multimodal() -> ChatMessage {
        ChatMessage::user(vec![
            ContentPart::text("what is this?"),
            ContentPart::image_base64("image/png", "data:image/png;base64,AAAA"),
            ContentPart::text("be brief"),
        ])
    }

    #[test]
    fn roles_pass_through_unchanged() {
        let out = normalize_messages(
            &[
                ChatMessage::system("S"),
                ChatMessage::user("A"),
                ChatMessage::user("B"),
                ChatMessage::assistant("C"),
            ],
            false,
        );
        let roles: Vec<_> = out.iter().map(|m| m["role"].as_str().unwrap()).collect();
        assert_eq!(roles, ["system", "user", "user", "assistant"]);
        assert_eq!(out[1]["content"], "A");
    }

    #[test]
    fn non_vision_flattens_to_text() {
        let out = normalize_messages(&[multimodal()], false);
        assert_eq!(out[0]["content"], "what is this?\nbe brief");
    }

    #[test]
    fn vision_keeps_image_parts() {
        let out = normalize_messages(
            &[multimodal(), ChatMessage::user(vec![ContentPart::image_url("https://x/y.png")])],
            true,
        );
        let parts = out[0]["content"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/png;base64,AAAA");
        assert_eq!(out[1]["content"][0]["image_url"]["url"], "https://x/y.png");
    }

    #[test]
    fn bare_base64_becomes_data_url() {
        let out = normalize_messages(
            &[ChatMessage::user(vec![ContentPart::image_base64("image/jpeg", "QUJD")])],
            true,
        );
        assert_eq!(
            out[0]["content"][0]["image_url"]["url"],
            "data:image/jpeg;base64,QUJD"
        );
    }

    #[test]
    fn max_tokens_omitted_for_text_models() {
        let body = OpenAiRequestTransformer
            .transform_chat(&request(vec![ChatMessage::user("hi")], "gpt-3.5-turbo"))
            .unwrap();
        assert!(body.get("max_tokens").is_none());
        assert_eq!(body["stream"], true);
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn max_tokens_floor_for_vision_models() {
        let mut req = request(vec![ChatMessage::user("hi")], "gpt-4o");
        req.config.max_tokens = 100;
        let body = OpenAiRequestTransformer.transform_chat(&req).unwrap();
        assert_eq!(body["max_tokens"], 1024);

        req.config.max_tokens = 4000;
        let body = OpenAiRequestTransformer.transform_chat(&req).unwrap();
        assert_eq!(body["max_tokens"], 4000);
    }

    #[test]
    fn empty_model_is_rejected() {
        let err = OpenAiRequestTransformer
            .transform_chat(&request(vec![], " "))
            .unwrap_err();
        assert!(matches!(err, LlmError::InvalidParameter(_)));
    }

    #[test]
    fn extracts_completed_text() {
        let raw = json!({"choices":[{"message":{"role":"assistant","content":"Hello"}}]});
        assert_eq!(
            OpenAiResponseTransformer.transform_chat_response(&raw).unwrap(),
            "Hello"
        );
        assert_eq!(
            OpenAiResponseTransformer
                .transform_chat_response(&json!({"choices":[]}))
                .unwrap(),
            ""
        );
        assert!(
            OpenAiResponseTransformer
                .transform_chat_response(&json!([1]))
                .is_err()
        );
    }
}
