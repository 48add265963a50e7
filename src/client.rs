//! Client Module
//!
//! `ChatClient` is the facade the rest of an application talks to. It picks
//! a provider client once, at construction, from a [`ModelProvider`], and
//! owns the shared settings every call snapshots when it starts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::callbacks::{ChannelCallbacks, ChatCallbacks, ChatEvent};
use crate::config::{
    AccessConfig, ChatOptions, ErrorMessages, ModelConfig, ModelConfigLayers, ModelConfigOverride,
};
use crate::error::LlmError;
use crate::providers::anthropic::AnthropicClient;
use crate::providers::openai::OpenAiClient;
use crate::providers::{CallSnapshot, ClientContext};
use crate::streaming::AnimationConfig;
use crate::traits::ChatCapability;
use crate::types::{ChatMessage, ChatOutcome, ModelProvider};

/// Closed set of wire protocols
#[derive(Debug, Clone)]
pub enum ProviderClient {
    OpenAi(OpenAiClient),
    Anthropic(AnthropicClient),
}

impl ProviderClient {
    /// Claude models use the Anthropic client; everything else falls back
    /// to the OpenAI-compatible one.
    pub fn for_provider(provider: ModelProvider, context: Arc<ClientContext>) -> Self {
        if provider.is_anthropic() {
            Self::Anthropic(AnthropicClient::new(context))
        } else {
            Self::OpenAi(OpenAiClient::new(context))
        }
    }

    fn as_capability(&self) -> &dyn ChatCapability {
        match self {
            Self::OpenAi(client) => client,
            Self::Anthropic(client) => client,
        }
    }
}

/// Unified chat client
#[derive(Debug, Clone)]
pub struct ChatClient {
    provider: ModelProvider,
    inner: ProviderClient,
    context: Arc<ClientContext>,
}

impl ChatClient {
    pub fn builder() -> ChatClientBuilder {
        ChatClientBuilder::default()
    }

    pub const fn provider(&self) -> ModelProvider {
        self.provider
    }

    pub const fn provider_client(&self) -> &ProviderClient {
        &self.inner
    }

    /// Current access settings.
    pub fn access(&self) -> AccessConfig {
        self.context.access()
    }

    /// The settings a call with `options` would run with.
    pub fn snapshot(&self, options: &ChatOptions) -> CallSnapshot {
        self.context.snapshot(options)
    }

    /// Change endpoint or token. In-flight calls keep their snapshot.
    pub fn update_access(&self, update: impl FnOnce(&mut AccessConfig)) {
        self.context.update_access(update);
    }

    /// Replace the session layer after validating the fields it sets.
    pub fn set_session_config(&self, session: ModelConfigOverride) -> Result<(), LlmError> {
        session.validate_params()?;
        self.context.update_layers(|layers| layers.session = session);
        Ok(())
    }

    /// Replace the base layer after validating it.
    pub fn set_base_config(&self, base: ModelConfig) -> Result<(), LlmError> {
        base.validate_params()?;
        self.context.update_layers(|layers| layers.base = base);
        Ok(())
    }

    /// Spawn a call and receive its callbacks as events.
    ///
    /// The receiver yields a `CancelHandle` event first (unless the request
    /// could not be built) and ends after exactly one `Finish` or `Error`.
    pub fn chat_events(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
    ) -> (JoinHandle<ChatOutcome>, mpsc::UnboundedReceiver<ChatEvent>) {
        let (mut callbacks, rx) = ChannelCallbacks::channel();
        let client = self.clone();
        let task =
            tokio::spawn(async move { client.chat(messages, options, &mut callbacks).await });
        (task, rx)
    }
}

#[async_trait]
impl ChatCapability for ChatClient {
    fn provider_id(&self) -> &'static str {
        self.inner.as_capability().provider_id()
    }

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
        callbacks: &mut dyn ChatCallbacks,
    ) -> ChatOutcome {
        let span = tracing::info_span!(
            "chat",
            provider = self.provider_id(),
            model = %options.model,
            call_id = %Uuid::new_v4(),
        );
        self.inner
            .as_capability()
            .chat(messages, options, callbacks)
            .instrument(span)
            .await
    }
}

/// Builder for [`ChatClient`]
#[derive(Debug, Default)]
pub struct ChatClientBuilder {
    provider: ModelProvider,
    access: Option<AccessConfig>,
    endpoint: Option<String>,
    auth_token: Option<String>,
    model_config: ModelConfig,
    session_config: ModelConfigOverride,
    timeout: Option<Duration>,
    animation: AnimationConfig,
    messages: ErrorMessages,
    http_client: Option<reqwest::Client>,
}

impl ChatClientBuilder {
    pub fn provider(mut self, provider: ModelProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Select the provider by name; unknown names fall back to GPT.
    pub fn provider_name(mut self, name: &str) -> Self {
        self.provider = ModelProvider::parse_or_default(name);
        self
    }

    /// Start from a full access configuration instead of the environment.
    pub fn access(mut self, access: AccessConfig) -> Self {
        self.access = Some(access);
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn model_config(mut self, config: ModelConfig) -> Self {
        self.model_config = config;
        self
    }

    pub fn session_config(mut self, session: ModelConfigOverride) -> Self {
        self.session_config = session;
        self
    }

    /// Time allowed for the response to open
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<ChatClient, LlmError> {
        self.model_config.validate_params()?;
        self.session_config.validate_params()?;

        let mut access = self.access.unwrap_or_else(AccessConfig::from_env);
        if let Some(endpoint) = self.endpoint {
            access.set_endpoint(endpoint);
        }
        if let Some(token) = self.auth_token {
            access.set_auth_token(token);
        }
        if access.endpoint().trim().is_empty() {
            return Err(LlmError::ConfigurationError(
                "endpoint must be set (builder or CHATRELAY_BASE_URL)".to_string(),
            ));
        }

        let timeout = self
            .timeout
            .unwrap_or(crate::config::constants::REQUEST_TIMEOUT);
        if timeout.is_zero() {
            return Err(LlmError::ConfigurationError(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };

        let mut layers = ModelConfigLayers::new(self.model_config);
        layers.session = self.session_config;

        let mut context = ClientContext::new(access, layers, http_client);
        context.timeout = timeout;
        context.animation = self.animation;
        context.messages = self.messages;
        let context = Arc::new(context);

        Ok(ChatClient {
            provider: self.provider,
            inner: ProviderClient::for_provider(self.provider, context.clone()),
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ChatClientBuilder {
        ChatClient::builder()
            .access(AccessConfig::new("https://relay.example.com"))
            .auth_token("tok")
    }

    #[test]
    fn unknown_provider_falls_back_to_openai() {
        let client = builder().provider_name("mystery").build().unwrap();
        assert_eq!(client.provider(), ModelProvider::Gpt);
        assert!(matches!(client.provider_client(), ProviderClient::OpenAi(_)));
        assert_eq!(client.provider_id(), "openai");
    }

    #[test]
    fn claude_selects_anthropic() {
        let client = builder().provider(ModelProvider::Claude).build().unwrap();
        assert!(matches!(client.provider_client(), ProviderClient::Anthropic(_)));
        assert_eq!(client.provider_id(), "anthropic");
    }

    #[test]
    fn groq_uses_openai_wire_format() {
        let client = builder().provider_name("groq").build().unwrap();
        assert!(matches!(client.provider_client(), ProviderClient::OpenAi(_)));
    }

    #[test]
    fn invalid_base_config_is_rejected() {
        let mut config = ModelConfig::default();
        config.temperature = 3.5;
        let err = builder().model_config(config).build().unwrap_err();
        assert!(matches!(err, LlmError::InvalidParameter(_)));
    }

    #[test]
    fn invalid_session_config_is_rejected() {
        let session = ModelConfigOverride {
            temperature: Some(9.0),
            ..Default::default()
        };
        let err = builder().session_config(session.clone()).build().unwrap_err();
        assert!(matches!(err, LlmError::InvalidParameter(_)));

        let client = builder().build().unwrap();
        let err = client.set_session_config(session).unwrap_err();
        assert!(matches!(err, LlmError::InvalidParameter(_)));
        let config = client.snapshot(&ChatOptions::new("gpt-4o")).config;
        assert_eq!(config.temperature, 0.5);
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        let err = ChatClient::builder()
            .access(AccessConfig::new(""))
            .build()
            .unwrap_err();
        assert!(matches!(err, LlmError::ConfigurationError(_)));
    }

    #[test]
    fn session_layer_changes_later_snapshots_only() {
        let client = builder().build().unwrap();
        let options = ChatOptions::new("gpt-4o");
        let before = client.snapshot(&options);

        client
            .set_session_config(ModelConfigOverride {
                temperature: Some(1.2),
                model: Some("ignored-by-call".to_string()),
                ..Default::default()
            })
            .unwrap();
        let after = client.snapshot(&options);

        assert_eq!(before.config.temperature, 0.5);
        assert_eq!(after.config.temperature, 1.2);
        assert_eq!(after.config.model, "gpt-4o");
    }

    #[test]
    fn access_updates_are_visible() {
        let client = builder().build().unwrap();
        assert!(client.access().is_authorized());
        client.update_access(AccessConfig::clear_auth_token);
        assert!(!client.access().is_authorized());
    }
}
