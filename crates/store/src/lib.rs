//! Persistence boundary for the checkout system.
//!
//! Defines the read/write contracts checkout depends on ([`BasketStore`],
//! [`CatalogStore`], [`OrderStore`]), with in-memory implementations for
//! tests and single-node runs, and PostgreSQL implementations for real
//! deployments. The stores own their concurrency control; checkout assumes
//! their writes are safe to issue concurrently.

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::{Result, StoreError};
pub use memory::{InMemoryBasketStore, InMemoryCatalogStore, InMemoryOrderStore};
pub use postgres::{PostgresBasketStore, PostgresCatalogStore, PostgresOrderStore};

use async_trait::async_trait;
use common::{BasketId, CatalogItemId, OrderId};
use domain::{Basket, CatalogItem, Order};

/// Read access to baskets and their items.
#[async_trait]
pub trait BasketStore: Send + Sync {
    /// Loads a basket with its items, or None when no basket has this id.
    async fn basket_with_items(&self, id: BasketId) -> Result<Option<Basket>>;
}

/// Read access to catalog reference data.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Loads the catalog items matching the given ids.
    ///
    /// Ids with no matching record are simply absent from the result; the
    /// caller detects the gaps.
    async fn items_by_ids(&self, ids: &[CatalogItemId]) -> Result<Vec<CatalogItem>>;
}

/// Durable append-only storage for finished orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Appends an order, returning its assigned id. Durable once acknowledged.
    async fn append(&self, order: &Order) -> Result<OrderId>;

    /// Loads a previously appended order.
    async fn order(&self, id: OrderId) -> Result<Option<Order>>;
}
