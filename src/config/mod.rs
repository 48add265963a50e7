//! Configuration: relay access, layered model parameters, notices, constants

pub mod access;
pub mod constants;
pub mod messages;
pub mod model;

pub use access::AccessConfig;
pub use messages::ErrorMessages;
pub use model::{ChatOptions, ModelConfig, ModelConfigLayers, ModelConfigOverride};
