//! Order assembly from basket and catalog data.

use std::collections::HashMap;

use common::{BasketId, CatalogItemId};
use domain::{Address, CatalogItem, CatalogItemOrdered, Order, OrderItem, PictureUriComposer};
use store::{BasketStore, CatalogStore};

use crate::error::{CheckoutError, Result};

/// Builds immutable orders from basket contents and current catalog data.
///
/// Reads only; persisting the result belongs to the caller. Every order item
/// captures the catalog name, composed picture URI, and basket unit price at
/// assembly time, so later catalog edits leave historical orders untouched.
pub struct OrderAssembler<B, C, U> {
    baskets: B,
    catalog: C,
    uri_composer: U,
}

impl<B, C, U> OrderAssembler<B, C, U>
where
    B: BasketStore,
    C: CatalogStore,
    U: PictureUriComposer,
{
    /// Creates an assembler over the given readers.
    pub fn new(baskets: B, catalog: C, uri_composer: U) -> Self {
        Self {
            baskets,
            catalog,
            uri_composer,
        }
    }

    /// Assembles an order for the basket.
    ///
    /// Fails when the basket does not exist, is empty, or references a
    /// catalog id with no matching record; an unmatched item is never
    /// silently skipped.
    #[tracing::instrument(skip(self, ship_to))]
    pub async fn assemble(&self, basket_id: BasketId, ship_to: Address) -> Result<Order> {
        let basket = self
            .baskets
            .basket_with_items(basket_id)
            .await
            .map_err(CheckoutError::Read)?
            .ok_or(CheckoutError::BasketNotFound(basket_id))?;

        if basket.is_empty() {
            return Err(CheckoutError::EmptyBasket(basket_id));
        }

        let referenced = basket.referenced_catalog_ids();
        let catalog_items = self
            .catalog
            .items_by_ids(&referenced)
            .await
            .map_err(CheckoutError::Read)?;
        let by_id: HashMap<CatalogItemId, CatalogItem> = catalog_items
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        let mut items = Vec::with_capacity(basket.item_count());
        for basket_item in basket.items() {
            let catalog_item = by_id
                .get(&basket_item.catalog_item_id())
                .ok_or(CheckoutError::MissingCatalogItem(basket_item.catalog_item_id()))?;

            let item_ordered = CatalogItemOrdered {
                catalog_item_id: catalog_item.id,
                name: catalog_item.name.clone(),
                picture_uri: self.uri_composer.compose(&catalog_item.picture_uri),
            };
            items.push(OrderItem::new(
                item_ordered,
                basket_item.unit_price(),
                basket_item.quantity(),
            ));
        }

        Ok(Order::new(basket.buyer_id().clone(), ship_to, items))
    }
}
