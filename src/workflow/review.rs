//! Review invariant enforcement.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::aggregates::Review;
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::Rating;
use crate::error::{AppError, Result};
use crate::state::AppContext;
use crate::store::ReviewWithAuthor;

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewInput {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i16,
    #[validate(length(min = 10, max = 500, message = "comment must be 10 to 500 characters"))]
    pub comment: String,
}

/// One review per (author, product). The lookup enforces the invariant
/// for the common path; the unique index catches racing submissions.
pub async fn add_review(ctx: &AppContext, author_id: Uuid, product_id: Uuid, input: ReviewInput) -> Result<Review> {
    let product = ctx.products.find(product_id).await?.ok_or(AppError::NotFound("product"))?;
    if ctx.reviews.find_by_author_and_product(author_id, product_id).await?.is_some() {
        return Err(AppError::DuplicateReview);
    }
    let rating = Rating::new(input.rating).map_err(|e| AppError::Validation(e.to_string()))?;
    let review = Review::create(product.id, author_id, rating, input.comment);
    ctx.reviews.create(&review).await?;
    ctx.publish(DomainEvent::ReviewAdded {
        review_id: review.id,
        product_id,
        author_id,
        rating: review.rating,
    })
    .await;
    Ok(review)
}

pub async fn list_reviews(
    ctx: &AppContext,
    product_id: Uuid,
    page: u32,
    limit: u32,
) -> Result<(Vec<ReviewWithAuthor>, i64)> {
    if ctx.products.find(product_id).await?.is_none() {
        return Err(AppError::NotFound("product"));
    }
    ctx.reviews.list_for_product(product_id, page, limit).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds_rejected_before_any_write() {
        let low = ReviewInput { rating: 0, comment: "ten characters".into() };
        let high = ReviewInput { rating: 6, comment: "ten characters".into() };
        assert!(low.validate().is_err());
        assert!(high.validate().is_err());
        let ok = ReviewInput { rating: 5, comment: "ten characters".into() };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_comment_length_bounds() {
        let short = ReviewInput { rating: 3, comment: "too short".into() };
        assert!(short.validate().is_err());
        let long = ReviewInput { rating: 3, comment: "x".repeat(501) };
        assert!(long.validate().is_err());
    }
}
