//! Response animator
//!
//! Paces the release of received text independently of how frames arrive.
//! Each tick releases `max(1, round(pending / divisor))` chars from the
//! front of the pending buffer, so big bursts drain quickly and trickles
//! are shown one char at a time. A terminal state flushes everything.

use std::time::Duration;

use super::state::StreamState;
use crate::config::constants::{ANIMATION_DIVISOR, ANIMATION_TICK};

/// Pacing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Delay between ticks
    pub tick: Duration,
    /// Pending length is divided by this to size each release
    pub divisor: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick: ANIMATION_TICK,
            divisor: ANIMATION_DIVISOR,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseAnimator {
    config: AnimationConfig,
}

impl ResponseAnimator {
    pub const fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    /// Number of chars released for a given pending length.
    pub fn chunk_size(&self, pending: usize) -> usize {
        let divisor = self.config.divisor.max(1) as f64;
        ((pending as f64 / divisor).round() as usize).max(1)
    }

    /// Run one tick. Returns the released chunk when the caller should be
    /// notified; `None` when nothing was pending or the stream is over.
    pub fn tick(&self, state: &mut StreamState) -> Option<String> {
        if state.is_finished() {
            state.flush();
            return None;
        }
        let pending = state.pending_len();
        if pending == 0 {
            return None;
        }
        Some(state.release(self.chunk_size(pending)))
    }
}
