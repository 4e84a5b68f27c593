//! Notification payloads derived from an order.

use chrono::{DateTime, Utc};
use common::{CatalogItemId, Money};
use serde::{Deserialize, Serialize};

use crate::order::{Address, Order, OrderItem};

/// Lightweight projection of an order for downstream consumers.
///
/// Derived on demand; never persisted independently of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_date: DateTime<Utc>,
    pub ship_to_address: Address,
    pub items: Vec<OrderItem>,
    pub total: Money,
}

impl OrderSummary {
    /// Pure projection of an order: date, address, items, computed total.
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_date: order.order_date(),
            ship_to_address: order.ship_to_address().clone(),
            items: order.items().to_vec(),
            total: order.total(),
        }
    }

    /// Returns the reduced reservation payload for this summary's items.
    pub fn reservation_lines(&self) -> Vec<ReservationLine> {
        reduce(&self.items)
    }
}

/// Minimal `{itemId, quantity}` line the reservation subsystem consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationLine {
    pub item_id: CatalogItemId,
    pub quantity: u32,
}

/// Maps each order line to its reservation line, preserving input order.
pub fn reduce(items: &[OrderItem]) -> Vec<ReservationLine> {
    items
        .iter()
        .map(|item| ReservationLine {
            item_id: item.item_ordered.catalog_item_id,
            quantity: item.units,
        })
        .collect()
}
