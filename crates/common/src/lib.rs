//! Shared types for the checkout system.
//!
//! Identifier newtypes keep basket, catalog, order, and buyer ids from being
//! mixed up, and [`Money`] keeps all price arithmetic in integer cents.

pub mod ids;
pub mod money;

pub use ids::{BasketId, BuyerId, CatalogItemId, OrderId};
pub use money::Money;
