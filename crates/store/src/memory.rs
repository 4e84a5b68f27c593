use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{BasketId, CatalogItemId, OrderId};
use domain::{Basket, CatalogItem, Order};
use tokio::sync::RwLock;

use crate::{BasketStore, CatalogStore, OrderStore, Result, StoreError};

/// In-memory basket store for tests and single-node runs.
#[derive(Clone, Default)]
pub struct InMemoryBasketStore {
    baskets: Arc<RwLock<HashMap<BasketId, Basket>>>,
}

impl InMemoryBasketStore {
    /// Creates a new empty basket store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a basket.
    pub async fn insert(&self, basket: Basket) {
        self.baskets.write().await.insert(basket.id(), basket);
    }

    /// Returns the number of stored baskets.
    pub async fn basket_count(&self) -> usize {
        self.baskets.read().await.len()
    }
}

#[async_trait]
impl BasketStore for InMemoryBasketStore {
    async fn basket_with_items(&self, id: BasketId) -> Result<Option<Basket>> {
        Ok(self.baskets.read().await.get(&id).cloned())
    }
}

/// In-memory catalog store for tests and single-node runs.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    items: Arc<RwLock<HashMap<CatalogItemId, CatalogItem>>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty catalog store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a catalog record.
    pub async fn insert(&self, item: CatalogItem) {
        self.items.write().await.insert(item.id, item);
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn items_by_ids(&self, ids: &[CatalogItemId]) -> Result<Vec<CatalogItem>> {
        let items = self.items.read().await;
        Ok(ids.iter().filter_map(|id| items.get(id).cloned()).collect())
    }
}

#[derive(Default)]
struct OrderStoreState {
    orders: Vec<(OrderId, Order)>,
    fail_on_append: bool,
}

/// In-memory order store with failure injection for tests.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<OrderStoreState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to reject every subsequent append.
    pub async fn set_fail_on_append(&self, fail: bool) {
        self.state.write().await.fail_on_append = fail;
    }

    /// Returns the number of appended orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns all appended orders, in append order.
    pub async fn orders(&self) -> Vec<Order> {
        self.state
            .read()
            .await
            .orders
            .iter()
            .map(|(_, order)| order.clone())
            .collect()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn append(&self, order: &Order) -> Result<OrderId> {
        let mut state = self.state.write().await;

        if state.fail_on_append {
            return Err(StoreError::Unavailable("order store offline".to_string()));
        }

        let id = OrderId::new();
        state.orders.push((id, order.clone()));
        Ok(id)
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .iter()
            .find(|(order_id, _)| *order_id == id)
            .map(|(_, order)| order.clone()))
    }
}
