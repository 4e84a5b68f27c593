use std::time::Duration;

use thiserror::Error;

/// Transport-level failures talking to the reservation subsystem.
///
/// Callers log these and carry on; a failed notification never escalates
/// into a failed checkout.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// Queue connection or write failure.
    #[error("Queue transport error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failure.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Reservation endpoint returned status {status}")]
    Status { status: u16 },

    /// Payload serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport call exceeded its deadline.
    #[error("Transport call timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for notifier operations.
pub type Result<T> = std::result::Result<T, NotifierError>;
