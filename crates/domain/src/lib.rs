//! Domain layer for the checkout system.
//!
//! This crate provides the entities and pure transformations of checkout:
//! - Baskets and their line items
//! - Catalog reference data
//! - Immutable orders with prices captured at purchase time
//! - Order summaries and the reduced reservation payload
//! - The picture-URI composition boundary

pub mod basket;
pub mod catalog;
pub mod error;
pub mod order;
pub mod summary;
pub mod uri;

pub use basket::{Basket, BasketItem};
pub use catalog::CatalogItem;
pub use error::DomainError;
pub use order::{Address, CatalogItemOrdered, Order, OrderItem};
pub use summary::{OrderSummary, ReservationLine, reduce};
pub use uri::{BaseUrlComposer, PictureUriComposer};
