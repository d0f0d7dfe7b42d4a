//! Order Aggregate
//!
//! An order is an immutable snapshot of a cart taken at checkout. Line
//! items capture the unit price in effect when the order was placed, so
//! later catalog changes never alter order history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::aggregates::Product;

/// A deep-copied order line. Never resolved against the live catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl LineItem {
    /// Snapshot a resolved product at its current price.
    pub fn snapshot(product: &Product, quantity: i32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            line_total: product.price * Decimal::from(quantity),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub items: Vec<LineItem>,
    pub total: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build an order from already-snapshotted lines. Fails when no line
    /// survived resolution, which includes the entirely-stale cart case.
    pub fn place(
        order_number: String,
        user_id: Uuid,
        items: Vec<LineItem>,
        currency: &str,
    ) -> Result<Self, OrderError> {
        if items.is_empty() { return Err(OrderError::Empty); }
        let total = items.iter().map(|i| i.line_total).sum();
        Ok(Self {
            id: Uuid::now_v7(),
            order_number,
            user_id,
            items,
            total,
            currency: currency.to_string(),
            created_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum OrderError { Empty }
impl std::error::Error for OrderError {}
impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Cart is empty") }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: Decimal) -> Product {
        Product::create(name, "description here", price, 10, "misc", None, Uuid::new_v4())
    }

    #[test]
    fn test_snapshot_captures_current_price() {
        let p = product("Widget", Decimal::new(10, 0));
        let line = LineItem::snapshot(&p, 2);
        assert_eq!(line.unit_price, Decimal::new(10, 0));
        assert_eq!(line.line_total, Decimal::new(20, 0));
        assert_eq!(line.name, "Widget");
    }

    #[test]
    fn test_place_totals_lines() {
        let a = LineItem::snapshot(&product("Widget", Decimal::new(10, 0)), 2);
        let b = LineItem::snapshot(&product("Gadget", Decimal::new(5, 0)), 1);
        let order = Order::place("ORD-00000001".into(), Uuid::new_v4(), vec![a, b], "USD").unwrap();
        assert_eq!(order.total, Decimal::new(25, 0));
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn test_place_rejects_empty() {
        assert_eq!(
            Order::place("ORD-00000002".into(), Uuid::new_v4(), vec![], "USD").unwrap_err(),
            OrderError::Empty
        );
    }
}
