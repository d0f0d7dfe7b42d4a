//! Order collection access. Orders are written once and never updated.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::aggregates::{LineItem, Order};
use crate::error::Result;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: String,
    user_id: Uuid,
    items: Json<Vec<LineItem>>,
    total: Decimal,
    currency: String,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            order_number: row.order_number,
            user_id: row.user_id,
            items: row.items.0,
            total: row.total,
            currency: row.currency,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct OrderStore {
    pool: PgPool,
}

impl OrderStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    pub async fn find(&self, id: Uuid) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Order::from))
    }

    /// Newest-first page of a user's order history plus the total count.
    pub async fn list_for_user(&self, user_id: Uuid, page: u32, limit: u32) -> Result<(Vec<Order>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .bind((i64::from(page) - 1) * i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok((rows.into_iter().map(Order::from).collect(), total))
    }
}
