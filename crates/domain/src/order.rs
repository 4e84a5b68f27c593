//! Immutable orders with prices captured at purchase time.

use chrono::{DateTime, Utc};
use common::{BuyerId, CatalogItemId, Money};
use serde::{Deserialize, Serialize};

/// Shipping destination. Opaque to the checkout core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip: String,
}

impl Address {
    /// Creates an address value.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            country: country.into(),
            zip: zip.into(),
        }
    }
}

/// Catalog data captured at the moment of purchase.
///
/// Later catalog edits must not change what a historical order shows, so the
/// name and composed picture URI live on the order item, not behind the
/// catalog id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemOrdered {
    pub catalog_item_id: CatalogItemId,
    pub name: String,
    pub picture_uri: String,
}

/// A purchased line with its price locked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Snapshot of the catalog item as it was when the order was assembled.
    pub item_ordered: CatalogItemOrdered,

    /// Price per unit at purchase time.
    pub unit_price: Money,

    /// Units purchased.
    pub units: u32,
}

impl OrderItem {
    /// Creates an order line.
    pub fn new(item_ordered: CatalogItemOrdered, unit_price: Money, units: u32) -> Self {
        Self {
            item_ordered,
            unit_price,
            units,
        }
    }

    /// Returns unit price × units for this line.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.units)
    }
}

/// A finalized purchase: created once, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    buyer_id: BuyerId,
    ship_to_address: Address,
    order_date: DateTime<Utc>,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates an order, stamping the creation time.
    pub fn new(buyer_id: BuyerId, ship_to_address: Address, items: Vec<OrderItem>) -> Self {
        Self {
            buyer_id,
            ship_to_address,
            order_date: Utc::now(),
            items,
        }
    }

    /// Rebuilds a persisted order, keeping its original timestamp.
    pub fn from_parts(
        buyer_id: BuyerId,
        ship_to_address: Address,
        order_date: DateTime<Utc>,
        items: Vec<OrderItem>,
    ) -> Self {
        Self {
            buyer_id,
            ship_to_address,
            order_date,
            items,
        }
    }

    /// Returns the buyer who placed the order.
    pub fn buyer_id(&self) -> &BuyerId {
        &self.buyer_id
    }

    /// Returns the shipping destination.
    pub fn ship_to_address(&self) -> &Address {
        &self.ship_to_address
    }

    /// Returns the creation timestamp.
    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    /// Returns the order lines in basket order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of unit price × units across all lines, computed on demand.
    ///
    /// Never stored, so it cannot drift from the items.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}
