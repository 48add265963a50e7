//! User-facing notices rendered as assistant text
//!
//! The relay answers auth and billing problems with fixed status codes;
//! these are the texts shown in place of a model reply. Override them to
//! localise.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorMessages {
    /// HTTP 401
    pub unauthorized: String,
    /// Local check failed before a streaming call
    pub sign_in_required: String,
    /// HTTP 402
    pub insufficient_balance: String,
    /// HTTP 406
    pub paid_tier_required: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            unauthorized: "Welcome! Please sign in first. New accounts receive free daily \
                           credits for the entry-level models."
                .to_string(),
            sign_in_required: "Please sign in and try again.".to_string(),
            insufficient_balance: "Sorry, your credit balance is too low for this \
                                   conversation. Free credits are topped up daily, or you can \
                                   purchase credits to continue right away."
                .to_string(),
            paid_tier_required: "This model requires paid credits. Please purchase credits \
                                 before using it."
                .to_string(),
        }
    }
}

impl ErrorMessages {
    /// Fixed notice for the statuses the relay reserves, if any.
    pub fn for_status(&self, status: u16) -> Option<&str> {
        match status {
            401 => Some(&self.unauthorized),
            402 => Some(&self.insufficient_balance),
            406 => Some(&self.paid_tier_required),
            _ => None,
        }
    }
}
