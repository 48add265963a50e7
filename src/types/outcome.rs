//! Terminal results of a chat call

use serde::{Deserialize, Serialize};

/// Caller-visible failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// HTTP 401 from the relay
    Unauthorized,
    /// HTTP 402 - balance exhausted
    InsufficientBalance,
    /// HTTP 406 - model needs paid credits
    PaidTierRequired,
    /// Any other response that is not a usable event stream / JSON body
    Protocol,
    /// Failure delivered through the error callback instead of chat text
    Transport,
}

impl FailureKind {
    /// Map a response status to the billing/auth kinds the relay uses,
    /// falling back to `Protocol`.
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            402 => Self::InsufficientBalance,
            406 => Self::PaidTierRequired,
            _ => Self::Protocol,
        }
    }
}

/// Why an in-flight call stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// The caller triggered the cancel handle
    Cancelled,
    /// The response did not open before the timeout fired
    TimedOut,
}

/// Exactly one of these is produced per chat call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatOutcome {
    Completed {
        text: String,
    },
    Aborted {
        partial_text: String,
        reason: AbortReason,
    },
    Failed {
        kind: FailureKind,
        detail: String,
    },
}

impl ChatOutcome {
    /// Text the caller saw in its finish callback, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Completed { text } => Some(text),
            Self::Aborted { partial_text, .. } => Some(partial_text),
            Self::Failed {
                kind: FailureKind::Transport,
                ..
            } => None,
            Self::Failed { detail, .. } => Some(detail),
        }
    }

    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
