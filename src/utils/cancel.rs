//! Cancellation utilities
//!
//! One handle per chat call. The caller receives a clone before the request
//! is sent and may trigger it at any time; the timeout timer triggers the
//! same handle.

use tokio_util::sync::CancellationToken;

/// A handle that can be used to request cancellation of an in-flight call.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. In-flight transport operations stop at their
    /// next suspension point and the call finishes with the text received
    /// so far. Calling this more than once is harmless.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}
