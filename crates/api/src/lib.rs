//! HTTP API for the checkout service.
//!
//! Exposes checkout, order lookup, and basket/catalog seeding endpoints,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::sync::atomic::AtomicI32;

use axum::Router;
use axum::routing::{get, post};
use checkout::CheckoutService;
use domain::BaseUrlComposer;
use metrics_exporter_prometheus::PrometheusHandle;
use notifier::ReservationNotifier;
use store::{InMemoryBasketStore, InMemoryCatalogStore, InMemoryOrderStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
use routes::checkout::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/checkout", post(routes::checkout::create))
        .route("/orders/{id}", get(routes::checkout::get_order))
        .route("/baskets", post(routes::baskets::create))
        .route("/catalog/items", post(routes::baskets::create_catalog_item))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over in-memory stores and the
/// given reservation notifier.
pub fn create_default_state(
    notifier: Arc<dyn ReservationNotifier>,
    config: &Config,
) -> Arc<AppState> {
    let baskets = InMemoryBasketStore::new();
    let catalog = InMemoryCatalogStore::new();
    let orders = InMemoryOrderStore::new();

    let checkout = CheckoutService::new(
        baskets.clone(),
        catalog.clone(),
        orders.clone(),
        notifier,
        BaseUrlComposer::new(config.catalog_cdn_base.clone()),
    );

    Arc::new(AppState {
        checkout,
        baskets,
        catalog,
        orders,
        next_basket_id: AtomicI32::new(1),
    })
}
