//! Provider identifiers
//!
//! `ModelProvider` picks the wire protocol (and therefore the client);
//! `ServiceProvider` is the code sent to the relay so it can route the
//! request upstream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client selection used by the facade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelProvider {
    #[default]
    Gpt,
    Claude,
    Groq,
}

impl ModelProvider {
    /// Parse a provider name, falling back to the OpenAI-compatible client
    /// for anything unrecognised.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Whether requests for this provider speak the Anthropic Messages protocol
    pub const fn is_anthropic(&self) -> bool {
        matches!(self, Self::Claude)
    }
}

impl FromStr for ModelProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpt" | "openai" => Ok(Self::Gpt),
            "claude" | "anthropic" => Ok(Self::Claude),
            "groq" => Ok(Self::Groq),
            other => Err(format!("unknown model provider: {other}")),
        }
    }
}

/// Upstream routing code carried in the provider header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceProvider {
    OpenAI,
    Anthropic,
    Google,
    Groq,
}

impl ServiceProvider {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Google => "Google",
            Self::Groq => "Groq",
        }
    }

    /// Route an OpenAI-compatible request by model name: `gpt*` models go
    /// to OpenAI, everything else to the secondary compatible backend.
    pub fn for_openai_compatible_model(model: &str) -> Self {
        if model.starts_with(crate::config::constants::OPENAI_MODEL_PREFIX) {
            Self::OpenAI
        } else {
            Self::Groq
        }
    }
}

impl fmt::Display for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
