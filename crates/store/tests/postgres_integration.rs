//! PostgreSQL integration tests
//!
//! These tests share one PostgreSQL container. Run with:
//!
//! ```bash
//! cargo test -p store --test postgres_integration
//! ```

use std::sync::Arc;

use common::{BasketId, BuyerId, CatalogItemId, Money};
use domain::{Address, Basket, BasketItem, CatalogItem, CatalogItemOrdered, Order, OrderItem};
use serial_test::serial;
use sqlx::PgPool;
use store::{
    BasketStore, CatalogStore, OrderStore, PostgresBasketStore, PostgresCatalogStore,
    PostgresOrderStore,
};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_checkout_tables.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Fresh pool per test with cleared tables.
async fn get_test_pool() -> PgPool {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE baskets, basket_items, catalog_items, orders")
        .execute(&pool)
        .await
        .unwrap();

    pool
}

fn sample_basket(id: i32) -> Basket {
    Basket::new(
        BasketId::new(id),
        BuyerId::new("b1"),
        vec![
            BasketItem::new(CatalogItemId::new(5), Money::from_cents(350), 4).unwrap(),
            BasketItem::new(CatalogItemId::new(7), Money::from_cents(1000), 2).unwrap(),
        ],
    )
}

fn sample_order() -> Order {
    Order::new(
        BuyerId::new("b1"),
        Address::new("1 Main St", "Springfield", "OR", "USA", "97477"),
        vec![OrderItem::new(
            CatalogItemOrdered {
                catalog_item_id: CatalogItemId::new(5),
                name: "Widget".to_string(),
                picture_uri: "https://cdn.example.net/widget.png".to_string(),
            },
            Money::from_cents(350),
            4,
        )],
    )
}

#[tokio::test]
#[serial]
async fn basket_roundtrip_preserves_items_in_order() {
    let pool = get_test_pool().await;
    let store = PostgresBasketStore::new(pool);

    let basket = sample_basket(1);
    store.insert(&basket).await.unwrap();

    let loaded = store
        .basket_with_items(BasketId::new(1))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(loaded, basket);
}

#[tokio::test]
#[serial]
async fn missing_basket_is_none() {
    let pool = get_test_pool().await;
    let store = PostgresBasketStore::new(pool);

    let loaded = store.basket_with_items(BasketId::new(404)).await.unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
#[serial]
async fn catalog_lookup_returns_only_known_ids() {
    let pool = get_test_pool().await;
    let store = PostgresCatalogStore::new(pool);

    store
        .insert(&CatalogItem::new(CatalogItemId::new(5), "Widget", "widget.png"))
        .await
        .unwrap();
    store
        .insert(&CatalogItem::new(CatalogItemId::new(7), "Gadget", "gadget.png"))
        .await
        .unwrap();

    let found = store
        .items_by_ids(&[
            CatalogItemId::new(5),
            CatalogItemId::new(7),
            CatalogItemId::new(99),
        ])
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().any(|i| i.name == "Widget"));
    assert!(found.iter().any(|i| i.name == "Gadget"));
}

#[tokio::test]
#[serial]
async fn order_roundtrip_recomputes_total_from_items() {
    let pool = get_test_pool().await;
    let store = PostgresOrderStore::new(pool);

    let order = sample_order();
    let id = store.append(&order).await.unwrap();

    let loaded = store.order(id).await.unwrap().unwrap();
    assert_eq!(loaded, order);
    assert_eq!(loaded.total().cents(), 1400);
}

#[tokio::test]
#[serial]
async fn appends_assign_distinct_ids() {
    let pool = get_test_pool().await;
    let store = PostgresOrderStore::new(pool);

    let order = sample_order();
    let id1 = store.append(&order).await.unwrap();
    let id2 = store.append(&order).await.unwrap();

    assert_ne!(id1, id2);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 2);
}
