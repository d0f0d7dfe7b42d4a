//! Review records
//!
//! At most one review per (author, product) pair; the invariant is
//! checked before the write and backed by a unique index in storage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::Rating;

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub author_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn create(product_id: Uuid, author_id: Uuid, rating: Rating, comment: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_id,
            author_id,
            rating: rating.value(),
            comment: comment.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_carries_rating_value() {
        let r = Review::create(Uuid::new_v4(), Uuid::new_v4(), Rating::new(4).unwrap(), "solid product, would buy again");
        assert_eq!(r.rating, 4);
    }
}
