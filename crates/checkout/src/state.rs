//! Checkout state machine.

use serde::{Deserialize, Serialize};

/// The state of one checkout as it moves through the flow.
///
/// State transitions:
/// ```text
/// Validating ──┬──► Notifying ──► Persisting ──► Completed
///              └──► Rejected
/// ```
///
/// Notification outcome never branches the machine; only validation can
/// reject, and only persistence failure stops a checkout after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// Basket and catalog data are being validated and assembled.
    #[default]
    Validating,

    /// The reservation subsystem is being notified.
    Notifying,

    /// The order is being appended to the order store.
    Persisting,

    /// The order is placed (terminal state).
    Completed,

    /// Validation failed; nothing was persisted (terminal state).
    Rejected,
}

impl CheckoutState {
    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Completed | CheckoutState::Rejected)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Validating => "Validating",
            CheckoutState::Notifying => "Notifying",
            CheckoutState::Persisting => "Persisting",
            CheckoutState::Completed => "Completed",
            CheckoutState::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
