/*
 * Responsibility
 * - orders + order_items, written together in one transaction
 * - totals are computed by the caller; the repo stores what it is given
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shipping_address1: String,
    pub shipping_address2: Option<String>,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub status: String,
    pub total_price: f64,
    pub date_ordered: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub order: OrderRow,
    pub items: Vec<OrderItemRow>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub items: Vec<NewOrderItem>,
    pub shipping_address1: String,
    pub shipping_address2: Option<String>,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub status: String,
    pub total_price: f64,
}

#[async_trait]
pub trait OrderRepo: Send + Sync {
    /// Newest first.
    async fn list(&self) -> RepoResult<Vec<Order>>;
    async fn list_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Order>>;
    async fn get(&self, id: Uuid) -> RepoResult<Option<Order>>;
    async fn create(&self, order: NewOrder) -> RepoResult<Order>;
    async fn update_status(&self, id: Uuid, status: &str) -> RepoResult<Option<Order>>;
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
    async fn total_sales(&self) -> RepoResult<f64>;
    async fn count(&self) -> RepoResult<i64>;
}

const ORDER_COLUMNS: &str = r#"
    id, user_id, shipping_address1, shipping_address2, city, zip, country,
    phone, status, total_price, date_ordered
"#;

#[derive(Clone, Debug)]
pub struct PgOrderRepo {
    pool: PgPool,
}

impl PgOrderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn attach_items(&self, rows: Vec<OrderRow>) -> RepoResult<Vec<Order>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT id, order_id, product_id, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(|order| {
                let items = items
                    .iter()
                    .filter(|item| item.order_id == order.id)
                    .cloned()
                    .collect();
                Order { order, items }
            })
            .collect();

        Ok(orders)
    }
}

#[async_trait]
impl OrderRepo for PgOrderRepo {
    async fn list(&self) -> RepoResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY date_ordered DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        self.attach_items(rows).await
    }

    async fn list_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY date_ordered DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_items(rows).await
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.attach_items(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, order: NewOrder) -> RepoResult<Order> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO orders
                (user_id, shipping_address1, shipping_address2, city, zip, country,
                 phone, status, total_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order.user_id)
        .bind(order.shipping_address1)
        .bind(order.shipping_address2)
        .bind(order.city)
        .bind(order.zip)
        .bind(order.country)
        .bind(order.phone)
        .bind(order.status)
        .bind(order.total_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        let mut items = Vec::with_capacity(order.items.len());
        for item in order.items {
            let saved = sqlx::query_as::<_, OrderItemRow>(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity)
                VALUES ($1, $2, $3)
                RETURNING id, order_id, product_id, quantity
                "#,
            )
            .bind(row.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .fetch_one(&mut *tx)
            .await
            .map_err(RepoError::from_sqlx)?;
            items.push(saved);
        }

        tx.commit().await?;

        Ok(Order { order: row, items })
    }

    async fn update_status(&self, id: Uuid, status: &str) -> RepoResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.attach_items(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        // order_items go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn total_sales(&self) -> RepoResult<f64> {
        let total = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(total_price), 0)::float8 FROM orders",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn count(&self) -> RepoResult<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(n)
    }
}
