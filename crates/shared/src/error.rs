use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome taxonomy for a contact submission. Each variant maps to a
/// distinct `error` query value on the redirect back to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Wrong HTTP method or tripped honeypot. Deliberately the same
    /// reason for both so automated senders learn nothing.
    Invalid,
    /// Missing, malformed, or suspicious fields.
    Validation,
    /// Mail delivery failed downstream.
    Server,
}

impl RejectReason {
    pub fn as_query_value(self) -> &'static str {
        match self {
            RejectReason::Invalid => "invalid",
            RejectReason::Validation => "validation",
            RejectReason::Server => "server",
        }
    }
}

/// A refused submission: the reason bucket plus the accumulated
/// human-readable errors (empty for honeypot/method rejections).
#[derive(Debug, Clone, Error)]
#[error("submission rejected ({reason:?})")]
pub struct Rejection {
    pub reason: RejectReason,
    pub errors: Vec<String>,
}

impl Rejection {
    pub fn new(reason: RejectReason) -> Self {
        Self {
            reason,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(reason: RejectReason, errors: Vec<String>) -> Self {
        Self { reason, errors }
    }
}
