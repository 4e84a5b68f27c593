//! Buyer baskets awaiting checkout.

use common::{BasketId, BuyerId, CatalogItemId, Money};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One line of a basket: a catalog reference, the unit price the buyer saw,
/// and how many units they want.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    catalog_item_id: CatalogItemId,
    unit_price: Money,
    quantity: u32,
}

impl BasketItem {
    /// Creates a basket line. The quantity must be greater than zero.
    pub fn new(
        catalog_item_id: CatalogItemId,
        unit_price: Money,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }
        Ok(Self {
            catalog_item_id,
            unit_price,
            quantity,
        })
    }

    /// Returns the referenced catalog item id.
    pub fn catalog_item_id(&self) -> CatalogItemId {
        self.catalog_item_id
    }

    /// Returns the unit price at the time the item went into the basket.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns the requested unit count.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A buyer's in-progress selection.
///
/// Baskets are owned by the buyer session; deleting or archiving them after
/// a successful checkout is the basket store's concern, not this crate's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    id: BasketId,
    buyer_id: BuyerId,
    items: Vec<BasketItem>,
}

impl Basket {
    /// Creates a basket with its line items.
    pub fn new(id: BasketId, buyer_id: BuyerId, items: Vec<BasketItem>) -> Self {
        Self {
            id,
            buyer_id,
            items,
        }
    }

    /// Returns the basket id.
    pub fn id(&self) -> BasketId {
        self.id
    }

    /// Returns the owning buyer.
    pub fn buyer_id(&self) -> &BuyerId {
        &self.buyer_id
    }

    /// Returns the basket lines in insertion order.
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    /// Returns true if the basket has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Distinct catalog ids referenced by the basket, in first-seen order.
    pub fn referenced_catalog_ids(&self) -> Vec<CatalogItemId> {
        let mut seen = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.catalog_item_id) {
                seen.push(item.catalog_item_id);
            }
        }
        seen
    }
}
