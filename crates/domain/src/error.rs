//! Domain error types.

use thiserror::Error;

/// Errors that can occur while constructing domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Quantity must be greater than zero.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },
}
