//! Identifier newtypes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a buyer's basket.
///
/// Basket ids are integral keys assigned by the basket store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasketId(i32);

impl BasketId {
    /// Creates a basket id from its integral key.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the underlying key.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for BasketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for BasketId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Identifier of a sellable catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogItemId(i32);

impl CatalogItemId {
    /// Creates a catalog item id from its integral key.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the underlying key.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for CatalogItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for CatalogItemId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Identifier of a persisted order.
///
/// Assigned by the order store when an order is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random order id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an order id from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OrderId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Opaque handle identifying the buyer who owns a basket or placed an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuyerId(String);

impl BuyerId {
    /// Creates a buyer id from a string handle.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the buyer id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BuyerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BuyerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BuyerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for BuyerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basket_id_preserves_value() {
        let id = BasketId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn catalog_item_id_serializes_transparently() {
        let id = CatalogItemId::new(5);
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
    }

    #[test]
    fn order_id_new_creates_unique_ids() {
        let id1 = OrderId::new();
        let id2 = OrderId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn order_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = OrderId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn buyer_id_string_conversion() {
        let id = BuyerId::new("b1");
        assert_eq!(id.as_str(), "b1");

        let id2: BuyerId = "b2".into();
        assert_eq!(id2.as_str(), "b2");
    }

    #[test]
    fn ids_serialization_roundtrip() {
        let id = OrderId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
