//! Layered model configuration
//!
//! Resolution order, lowest to highest precedence:
//! base defaults < session override < per-call options.
//! The per-call model id always wins.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::constants::MAX_MAX_TOKENS;
use crate::error::LlmError;

/// Fully resolved model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ModelConfig {
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_p: f32,
    #[validate(range(min = -2.0, max = 2.0))]
    pub presence_penalty: f32,
    #[validate(range(min = -2.0, max = 2.0))]
    pub frequency_penalty: f32,
    #[validate(range(min = 1, max = 512000))]
    pub max_tokens: u32,
    pub stream: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.5,
            top_p: 1.0,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            max_tokens: 4000,
            stream: true,
        }
    }
}

impl ModelConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Run the range checks
    pub fn validate_params(&self) -> Result<(), LlmError> {
        self.validate()?;
        Ok(())
    }

    /// Copy with every numeric field forced into its accepted range.
    pub fn clamped(&self) -> Self {
        Self {
            model: self.model.clone(),
            temperature: self.temperature.clamp(0.0, 2.0),
            top_p: self.top_p.clamp(0.0, 1.0),
            presence_penalty: self.presence_penalty.clamp(-2.0, 2.0),
            frequency_penalty: self.frequency_penalty.clamp(-2.0, 2.0),
            max_tokens: self.max_tokens.clamp(1, MAX_MAX_TOKENS),
            stream: self.stream,
        }
    }

    /// Apply a partial layer on top of this one.
    pub fn merged_with(mut self, layer: &ModelConfigOverride) -> Self {
        if let Some(model) = &layer.model {
            self.model = model.clone();
        }
        if let Some(v) = layer.temperature {
            self.temperature = v;
        }
        if let Some(v) = layer.top_p {
            self.top_p = v;
        }
        if let Some(v) = layer.presence_penalty {
            self.presence_penalty = v;
        }
        if let Some(v) = layer.frequency_penalty {
            self.frequency_penalty = v;
        }
        if let Some(v) = layer.max_tokens {
            self.max_tokens = v;
        }
        if let Some(v) = layer.stream {
            self.stream = v;
        }
        self
    }
}

/// Partial config layer (e.g. the current session's settings)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ModelConfigOverride {
    #[validate(length(min = 1))]
    pub model: Option<String>,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_p: Option<f32>,
    #[validate(range(min = -2.0, max = 2.0))]
    pub presence_penalty: Option<f32>,
    #[validate(range(min = -2.0, max = 2.0))]
    pub frequency_penalty: Option<f32>,
    #[validate(range(min = 1, max = 512000))]
    pub max_tokens: Option<u32>,
    pub stream: Option<bool>,
}

impl ModelConfigOverride {
    /// Run the range checks on the fields that are set
    pub fn validate_params(&self) -> Result<(), LlmError> {
        self.validate()?;
        Ok(())
    }
}

/// Per-call settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Model id for this call; overrides every layer.
    pub model: String,
    /// Streaming flag for this call; `None` keeps the layered value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl ChatOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            stream: None,
        }
    }

    pub const fn with_stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }
}

/// Base + session layers held by the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelConfigLayers {
    pub base: ModelConfig,
    pub session: ModelConfigOverride,
}

impl ModelConfigLayers {
    pub fn new(base: ModelConfig) -> Self {
        Self {
            base,
            session: ModelConfigOverride::default(),
        }
    }

    /// Resolve the effective config for one call. Numeric values are
    /// clamped into their accepted ranges.
    pub fn resolve(&self, options: &ChatOptions) -> ModelConfig {
        let mut config = self.base.clone().merged_with(&self.session).clamped();
        config.model = options.model.clone();
        if let Some(stream) = options.stream {
            config.stream = stream;
        }
        config
    }
}
