//! OpenAI-compatible client

use std::sync::Arc;

use async_trait::async_trait;

use super::streaming::OpenAiEventConverter;
use super::transformers::{OpenAiRequestTransformer, OpenAiResponseTransformer};
use crate::callbacks::ChatCallbacks;
use crate::config::constants::OPENAI_CHAT_PATH;
use crate::config::{AccessConfig, ChatOptions};
use crate::executors::chat::{ChatExecutor, HttpChatExecutor};
use crate::providers::ClientContext;
use crate::traits::ChatCapability;
use crate::types::{ChatMessage, ChatOutcome, ChatRequest, ServiceProvider};
use crate::utils::http_headers::relay_headers;

/// Client for OpenAI-compatible chat completions
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    context: Arc<ClientContext>,
}

impl OpenAiClient {
    pub fn new(context: Arc<ClientContext>) -> Self {
        Self { context }
    }

    /// Executor bound to one access snapshot.
    pub(crate) fn executor(&self, access: &AccessConfig) -> HttpChatExecutor {
        let url = access.path(OPENAI_CHAT_PATH);
        let token = access.auth_token().map(str::to_string);

        HttpChatExecutor {
            provider_id: "openai".to_string(),
            http_client: self.context.http_client.clone(),
            request_transformer: Arc::new(OpenAiRequestTransformer),
            response_transformer: Arc::new(OpenAiResponseTransformer),
            stream_parser: Arc::new(OpenAiEventConverter),
            build_url: Box::new(move |_stream| url.clone()),
            build_headers: Box::new(move |req| {
                relay_headers(
                    token.as_deref(),
                    ServiceProvider::for_openai_compatible_model(&req.config.model),
                )
            }),
            authorized: access.is_authorized(),
            timeout: self.context.timeout,
            animation: self.context.animation,
            messages: self.context.messages.clone(),
        }
    }
}

#[async_trait]
impl ChatCapability for OpenAiClient {
    fn provider_id(&self) -> &'static str {
        "openai"
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
