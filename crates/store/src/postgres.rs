use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{BasketId, BuyerId, CatalogItemId, OrderId};
use domain::{Address, Basket, BasketItem, CatalogItem, Order, OrderItem};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{BasketStore, CatalogStore, OrderStore, Result, StoreError};

/// PostgreSQL-backed basket store.
#[derive(Clone)]
pub struct PostgresBasketStore {
    pool: PgPool,
}

impl PostgresBasketStore {
    /// Creates a basket store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a basket with its items.
    pub async fn insert(&self, basket: &Basket) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO baskets (id, buyer_id) VALUES ($1, $2)")
            .bind(basket.id().value())
            .bind(basket.buyer_id().as_str())
            .execute(&mut *tx)
            .await?;

        for (position, item) in basket.items().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO basket_items (basket_id, position, catalog_item_id, unit_price_cents, quantity)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(basket.id().value())
            .bind(position as i32)
            .bind(item.catalog_item_id().value())
            .bind(item.unit_price().cents())
            .bind(item.quantity() as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    fn row_to_item(row: PgRow) -> Result<BasketItem> {
        let catalog_item_id = CatalogItemId::new(row.try_get("catalog_item_id")?);
        let unit_price = common::Money::from_cents(row.try_get("unit_price_cents")?);
        let quantity = row.try_get::<i32, _>("quantity")? as u32;

        BasketItem::new(catalog_item_id, unit_price, quantity)
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}

#[async_trait]
impl BasketStore for PostgresBasketStore {
    async fn basket_with_items(&self, id: BasketId) -> Result<Option<Basket>> {
        let basket_row = sqlx::query("SELECT buyer_id FROM baskets WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        let Some(basket_row) = basket_row else {
            return Ok(None);
        };
        let buyer_id = BuyerId::new(basket_row.try_get::<String, _>("buyer_id")?);

        let item_rows = sqlx::query(
            r#"
            SELECT catalog_item_id, unit_price_cents, quantity
            FROM basket_items
            WHERE basket_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(id.value())
        .fetch_all(&self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Basket::new(id, buyer_id, items)))
    }
}

/// PostgreSQL-backed catalog store.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Creates a catalog store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or replaces a catalog record.
    pub async fn insert(&self, item: &CatalogItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO catalog_items (id, name, picture_uri)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                picture_uri = EXCLUDED.picture_uri
            "#,
        )
        .bind(item.id.value())
        .bind(&item.name)
        .bind(&item.picture_uri)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn items_by_ids(&self, ids: &[CatalogItemId]) -> Result<Vec<CatalogItem>> {
        let keys: Vec<i32> = ids.iter().map(CatalogItemId::value).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, name, picture_uri
            FROM catalog_items
            WHERE id = ANY($1)
            ORDER BY id ASC
            "#,
        )
        .bind(&keys)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(CatalogItem::new(
                    CatalogItemId::new(row.try_get("id")?),
                    row.try_get::<String, _>("name")?,
                    row.try_get::<String, _>("picture_uri")?,
                ))
            })
            .collect()
    }
}

/// PostgreSQL-backed order store.
///
/// Address and item snapshots are persisted as JSONB; the total is never a
/// column, it is always recomputed from the items.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates an order store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let buyer_id = BuyerId::new(row.try_get::<String, _>("buyer_id")?);
        let order_date: DateTime<Utc> = row.try_get("order_date")?;
        let ship_to: Address = serde_json::from_value(row.try_get("ship_to")?)?;
        let items: Vec<OrderItem> = serde_json::from_value(row.try_get("items")?)?;

        Ok(Order::from_parts(buyer_id, ship_to, order_date, items))
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[tracing::instrument(skip(self, order))]
    async fn append(&self, order: &Order) -> Result<OrderId> {
        let id = OrderId::new();
        let ship_to = serde_json::to_value(order.ship_to_address())?;
        let items = serde_json::to_value(order.items())?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, buyer_id, order_date, ship_to, items)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id.as_uuid())
        .bind(order.buyer_id().as_str())
        .bind(order.order_date())
        .bind(ship_to)
        .bind(items)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT buyer_id, order_date, ship_to, items
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order).transpose()
    }
}
