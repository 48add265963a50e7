//! Streaming support
//!
//! Call-scoped stream state and the animator that paces text release.

pub mod animator;
pub mod state;

pub use animator::{AnimationConfig, ResponseAnimator};
pub use state::{StreamPhase, StreamState};
