//! Product Aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// A catalog product. Mutated and deleted only by its author.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn create(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        stock: i32,
        category: impl Into<String>,
        image_url: Option<String>,
        author_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: description.into(),
            price,
            stock,
            category: category.into(),
            image_url,
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Ownership guard: true when the acting user is the product's author.
    pub fn owned_by(&self, user_id: Uuid) -> bool { self.author_id == user_id }

    pub fn is_in_stock(&self) -> bool { self.stock > 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_guard() {
        let author = Uuid::new_v4();
        let p = Product::create("Widget", "A widget", Decimal::new(999, 2), 5, "tools", None, author);
        assert!(p.owned_by(author));
        assert!(!p.owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_stock_flag() {
        let p = Product::create("Widget", "A widget", Decimal::new(999, 2), 0, "tools", None, Uuid::new_v4());
        assert!(!p.is_in_stock());
    }
}
