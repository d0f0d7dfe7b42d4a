//! Review collection access.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::aggregates::Review;
use crate::error::{AppError, Result};

/// A review joined with its author's username for listing payloads.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct ReviewWithAuthor {
    pub id: Uuid,
    pub product_id: Uuid,
    pub author_id: Uuid,
    pub author: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ReviewStore {
    pool: PgPool,
}

impl ReviewStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    pub async fn find_by_author_and_product(&self, author_id: Uuid, product_id: Uuid) -> Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE author_id = $1 AND product_id = $2",
        )
        .bind(author_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(review)
    }

    /// Insert a review. The unique index on (author, product) backstops
    /// the duplicate precondition when two submissions race.
    pub async fn create(&self, review: &Review) -> Result<()> {
        sqlx::query(
            "INSERT INTO reviews (id, product_id, author_id, rating, comment, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(review.id)
        .bind(review.product_id)
        .bind(review.author_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateReview,
            other => AppError::Storage(other),
        })?;
        Ok(())
    }

    /// Newest-first page of a product's reviews plus the total count.
    pub async fn list_for_product(&self, product_id: Uuid, page: u32, limit: u32) -> Result<(Vec<ReviewWithAuthor>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;
        let reviews = sqlx::query_as::<_, ReviewWithAuthor>(
            "SELECT r.id, r.product_id, r.author_id, u.username AS author, r.rating, r.comment, r.created_at \
             FROM reviews r JOIN users u ON u.id = r.author_id \
             WHERE r.product_id = $1 ORDER BY r.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(product_id)
        .bind(i64::from(limit))
        .bind((i64::from(page) - 1) * i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok((reviews, total))
    }
}
