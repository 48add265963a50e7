//! Provider clients
//!
//! One module per wire protocol. Both clients read the same shared
//! settings and take a snapshot of them when a call starts.

pub mod anthropic;
pub mod openai;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use crate::config::{AccessConfig, ChatOptions, ErrorMessages, ModelConfigLayers};
use crate::streaming::AnimationConfig;
use crate::types::ModelConfig;

/// Settings shared by every call made through one client
#[derive(Debug)]
pub struct ClientContext {
    pub(crate) access: RwLock<AccessConfig>,
    pub(crate) layers: RwLock<ModelConfigLayers>,
    pub http_client: reqwest::Client,
    pub timeout: Duration,
    pub animation: AnimationConfig,
    pub messages: ErrorMessages,
}

/// Read-only view of the mutable settings, taken once per call
#[derive(Debug, Clone)]
pub struct CallSnapshot {
    pub access: AccessConfig,
    pub config: ModelConfig,
}

impl ClientContext {
    pub fn new(
        access: AccessConfig,
        layers: ModelConfigLayers,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            access: RwLock::new(access),
            layers: RwLock::new(layers),
            http_client,
            timeout: crate::config::constants::REQUEST_TIMEOUT,
            animation: AnimationConfig::default(),
            messages: ErrorMessages::default(),
        }
    }

    pub fn access(&self) -> AccessConfig {
        self.access
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn snapshot(&self, options: &ChatOptions) -> CallSnapshot {
        let access = self.access();
        let config = self
            .layers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .resolve(options);
        CallSnapshot { access, config }
    }

    pub fn update_access(&self, update: impl FnOnce(&mut AccessConfig)) {
        update(&mut self.access.write().unwrap_or_else(PoisonError::into_inner));
    }

    pub fn update_layers(&self, update: impl FnOnce(&mut ModelConfigLayers)) {
        update(&mut self.layers.write().unwrap_or_else(PoisonError::into_inner));
    }
}
