//! Checkout and order lookup endpoints.

use std::sync::Arc;
use std::sync::atomic::AtomicI32;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use checkout::CheckoutService;
use common::{BasketId, OrderId};
use domain::{Address, BaseUrlComposer};
use notifier::ReservationNotifier;
use serde::{Deserialize, Serialize};
use store::{InMemoryBasketStore, InMemoryCatalogStore, InMemoryOrderStore, OrderStore};

use crate::error::ApiError;

/// The concrete checkout service this deployment wires up.
pub type AppCheckoutService = CheckoutService<
    InMemoryBasketStore,
    InMemoryCatalogStore,
    InMemoryOrderStore,
    Arc<dyn ReservationNotifier>,
    BaseUrlComposer,
>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub checkout: AppCheckoutService,
    pub baskets: InMemoryBasketStore,
    pub catalog: InMemoryCatalogStore,
    pub orders: InMemoryOrderStore,
    pub next_basket_id: AtomicI32,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub basket_id: i32,
    pub ship_to_address: AddressRequest,
}

#[derive(Deserialize)]
pub struct AddressRequest {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub notification: &'static str,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub buyer_id: String,
    pub order_date: String,
    pub items: Vec<OrderItemResponse>,
    pub total_cents: i64,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub catalog_item_id: i32,
    pub name: String,
    pub picture_uri: String,
    pub unit_price_cents: i64,
    pub units: u32,
}

// -- Handlers --

/// POST /checkout — convert a basket into a persisted order.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    let ship_to = Address::new(
        req.ship_to_address.street,
        req.ship_to_address.city,
        req.ship_to_address.state,
        req.ship_to_address.country,
        req.ship_to_address.zip,
    );

    let outcome = state
        .checkout
        .checkout(BasketId::new(req.basket_id), ship_to)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id: outcome.order_id.to_string(),
            notification: outcome.notification.as_str(),
        }),
    ))
}

/// GET /orders/{id} — load a placed order by id.
#[tracing::instrument(skip(state))]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order id: {e}")))?;
    let order_id = OrderId::from_uuid(uuid);

    let order = state
        .orders
        .order(order_id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    let items: Vec<OrderItemResponse> = order
        .items()
        .iter()
        .map(|item| OrderItemResponse {
            catalog_item_id: item.item_ordered.catalog_item_id.value(),
            name: item.item_ordered.name.clone(),
            picture_uri: item.item_ordered.picture_uri.clone(),
            unit_price_cents: item.unit_price.cents(),
            units: item.units,
        })
        .collect();

    Ok(Json(OrderResponse {
        id: order_id.to_string(),
        buyer_id: order.buyer_id().to_string(),
        order_date: order.order_date().to_rfc3339(),
        items,
        total_cents: order.total().cents(),
    }))
}
