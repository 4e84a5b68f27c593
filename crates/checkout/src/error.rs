//! Checkout error taxonomy.

use common::{BasketId, CatalogItemId};
use store::StoreError;
use thiserror::Error;

/// Errors that abort a checkout.
///
/// Notification failures are deliberately absent from this enum: they are
/// reported through the checkout outcome, never raised as errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No basket exists for the given id.
    #[error("Basket not found: {0}")]
    BasketNotFound(BasketId),

    /// Checkout attempted on a basket with zero items.
    #[error("Basket {0} is empty")]
    EmptyBasket(BasketId),

    /// A referenced catalog item has no matching catalog record.
    #[error("Catalog item not found: {0}")]
    MissingCatalogItem(CatalogItemId),

    /// Basket or catalog data could not be loaded.
    #[error("Failed to load checkout data: {0}")]
    Read(#[source] StoreError),

    /// The order store rejected the append; the order is not placed.
    #[error("Failed to persist order: {0}")]
    Persistence(#[source] StoreError),
}

/// Result type for checkout operations.
pub type Result<T> = std::result::Result<T, CheckoutError>;
