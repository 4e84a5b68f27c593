//! Basket and catalog seeding endpoints for the in-memory deployment.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::{BuyerId, CatalogItemId, Money};
use domain::{Basket, BasketItem, CatalogItem};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::checkout::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateBasketRequest {
    pub buyer_id: String,
    pub items: Vec<BasketItemRequest>,
}

#[derive(Deserialize)]
pub struct BasketItemRequest {
    pub catalog_item_id: i32,
    pub unit_price_cents: i64,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct CreateCatalogItemRequest {
    pub id: i32,
    pub name: String,
    pub picture_uri: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct BasketCreatedResponse {
    pub basket_id: i32,
}

// -- Handlers --

/// POST /baskets — create a basket with its items.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBasketRequest>,
) -> Result<(StatusCode, Json<BasketCreatedResponse>), ApiError> {
    let mut items = Vec::with_capacity(req.items.len());
    for item_req in &req.items {
        let item = BasketItem::new(
            CatalogItemId::new(item_req.catalog_item_id),
            Money::from_cents(item_req.unit_price_cents),
            item_req.quantity,
        )
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        items.push(item);
    }

    let basket_id = state.next_basket_id.fetch_add(1, Ordering::SeqCst);
    state
        .baskets
        .insert(Basket::new(basket_id.into(), BuyerId::new(req.buyer_id), items))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(BasketCreatedResponse { basket_id }),
    ))
}

/// POST /catalog/items — insert or replace a catalog record.
#[tracing::instrument(skip(state, req))]
pub async fn create_catalog_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCatalogItemRequest>,
) -> StatusCode {
    state
        .catalog
        .insert(CatalogItem::new(
            CatalogItemId::new(req.id),
            req.name,
            req.picture_uri,
        ))
        .await;

    StatusCode::CREATED
}
