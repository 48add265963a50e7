//! Anthropic Client Implementation

use std::sync::Arc;

use async_trait::async_trait;

use super::streaming::AnthropicEventConverter;
use super::transformers::{AnthropicRequestTransformer, AnthropicResponseTransformer};
use crate::callbacks::ChatCallbacks;
use crate::config::constants::ANTHROPIC_CHAT_PATH;
use crate::config::{AccessConfig, ChatOptions};
use crate::executors::chat::{ChatExecutor, HttpChatExecutor};
use crate::providers::ClientContext;
use crate::traits::ChatCapability;
use crate::types::{ChatMessage, ChatOutcome, ChatRequest, ServiceProvider};
use crate::utils::http_headers::relay_headers;

/// Anthropic Client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    context: Arc<ClientContext>,
}

impl AnthropicClient {
    pub fn new(context: Arc<ClientContext>) -> Self {
        Self { context }
    }

    pub(crate) fn executor(&self, access: &AccessConfig) -> HttpChatExecutor {
        let url = access.path(ANTHROPIC_CHAT_PATH);
        let token = access.auth_token().map(str::to_string);

        HttpChatExecutor {
            provider_id: "anthropic".to_string(),
            http_client: self.context.http_client.clone(),
            request_transformer: Arc::new(AnthropicRequestTransformer),
            response_transformer: Arc::new(AnthropicResponseTransformer),
            stream_parser: Arc::new(AnthropicEventConverter),
            build_url: Box::new(move |_stream| url.clone()),
            build_headers: Box::new(move |_req| {
                relay_headers(token.as_deref(), ServiceProvider::Anthropic)
            }),
            authorized: access.is_authorized(),
            timeout: self.context.timeout,
            animation: self.context.animation,
            messages: self.context.messages.clone(),
        }
    }
}

#[async_trait]
impl ChatCapability for AnthropicClient {
    fn provider_id(&self) -> &'static str {
        "anthropic"
    }

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
        callbacks: &mut dyn ChatCallbacks,
    ) -> ChatOutcome {
        let snapshot = self.context.snapshot(&options);
        let request = ChatRequest::new(messages, snapshot.config);
        self.executor(&snapshot.access)
            .execute(&request, callbacks)
            .await
    }
}
