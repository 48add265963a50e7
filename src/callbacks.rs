//! Caller contract for one chat call
//!
//! `on_finish` is invoked exactly once for every completed, aborted or
//! classified outcome. Failures that happen before a response is observed
//! (or that break the stream mid-way) go to `on_error` instead.

use tokio::sync::mpsc;

use crate::error::LlmError;
use crate::utils::CancelHandle;

/// Receives progress and the terminal notification of a chat call.
pub trait ChatCallbacks: Send {
    /// Text released by the animator. `full_text` already includes `delta`.
    fn on_update(&mut self, _full_text: &str, _delta: &str) {}

    /// Terminal callback with the final text.
    fn on_finish(&mut self, text: &str);

    fn on_error(&mut self, _error: &LlmError) {}

    /// Fired before the request is sent.
    fn on_cancel_handle(&mut self, _handle: CancelHandle) {}
}

/// Event form of [`ChatCallbacks`], used by `ChatClient::chat_events`.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    CancelHandle(CancelHandle),
    Update { full_text: String, delta: String },
    Finish { text: String },
    Error(LlmError),
}

impl ChatEvent {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finish { .. } | Self::Error(_))
    }
}

/// Forwards every callback into an unbounded channel.
///
/// Sends are fire-and-forget; a dropped receiver only means nobody is
/// listening any more.
#[derive(Debug, Clone)]
pub struct ChannelCallbacks {
    tx: mpsc::UnboundedSender<ChatEvent>,
}

impl ChannelCallbacks {
    pub fn new(tx: mpsc::UnboundedSender<ChatEvent>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: ChatEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("chat event receiver dropped");
        }
    }
}

impl ChatCallbacks for ChannelCallbacks {
    fn on_update(&mut self, full_text: &str, delta: &str) {
        self.send(ChatEvent::Update {
            full_text: full_text.to_string(),
            delta: delta.to_string(),
        });
    }

    fn on_finish(&mut self, text: &str) {
        self.send(ChatEvent::Finish {
            text: text.to_string(),
        });
    }

    fn on_error(&mut self, error: &LlmError) {
        self.send(ChatEvent::Error(error.clone()));
    }

    fn on_cancel_handle(&mut self, handle: CancelHandle) {
        self.send(ChatEvent::CancelHandle(handle));
    }
}
