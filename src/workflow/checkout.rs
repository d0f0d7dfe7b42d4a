//! Checkout: converts a cart into an immutable order.
//!
//! The whole conversion is one transaction: stock is re-checked and
//! decremented, the order row is written, and the cart is cleared, or
//! none of it happens. Prices are snapshotted from the rows locked in
//! the same transaction, so the order records exactly what was charged.

use std::collections::HashMap;

use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::aggregates::{LineItem, Order, Product};
use crate::domain::events::DomainEvent;
use crate::error::{AppError, Result};
use crate::state::AppContext;

pub async fn place_order(ctx: &AppContext, user_id: Uuid) -> Result<Order> {
    let user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    if user.cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let mut tx = ctx.db.begin().await?;
    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(user.cart.product_ids())
            .fetch_all(&mut *tx)
            .await?;
    let catalog: HashMap<Uuid, Product> = products.into_iter().map(|p| (p.id, p)).collect();

    let mut items = Vec::new();
    for entry in user.cart.entries() {
        // entries whose product was deleted drop out of the order
        let Some(product) = catalog.get(&entry.product_id) else { continue };
        if entry.quantity > product.stock {
            return Err(AppError::InsufficientStock);
        }
        items.push(LineItem::snapshot(product, entry.quantity));
    }
    let order = Order::place(order_number(), user_id, items, &ctx.config.currency)?;

    for item in &order.items {
        sqlx::query("UPDATE products SET stock = stock - $2, updated_at = NOW() WHERE id = $1")
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
    }
    sqlx::query(
        "INSERT INTO orders (id, order_number, user_id, items, total, currency, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(order.user_id)
    .bind(Json(&order.items))
    .bind(order.total)
    .bind(&order.currency)
    .bind(order.created_at)
    .execute(&mut *tx)
    .await?;
    sqlx::query("UPDATE users SET cart = '[]'::jsonb, updated_at = NOW() WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    ctx.publish(DomainEvent::OrderPlaced {
        order_id: order.id,
        user_id,
        total: order.total,
        items: order.items.len(),
    })
    .await;
    Ok(order)
}

fn order_number() -> String {
    format!("ORD-{:08}", rand::random::<u32>())
}
