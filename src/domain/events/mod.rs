//! Domain events
//!
//! Published to the message bus after the corresponding state change has
//! been committed. Publishing is best-effort; no behavior depends on it.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    ProductCreated { product_id: Uuid, author_id: Uuid },
    ProductDeleted { product_id: Uuid, reviews_deleted: u64 },
    ReviewAdded { review_id: Uuid, product_id: Uuid, author_id: Uuid, rating: i16 },
    OrderPlaced { order_id: Uuid, user_id: Uuid, total: Decimal, items: usize },
}

impl DomainEvent {
    /// Subject the event is published under.
    pub fn subject(&self) -> &'static str {
        match self {
            Self::ProductCreated { .. } => "storefront.catalog.created",
            Self::ProductDeleted { .. } => "storefront.catalog.deleted",
            Self::ReviewAdded { .. } => "storefront.reviews.added",
            Self::OrderPlaced { .. } => "storefront.orders.placed",
        }
    }
}
