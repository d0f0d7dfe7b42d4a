//! Review handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::api::identity::Identity;
use crate::api::{parse_id, PageParams, PaginatedResponse};
use crate::domain::aggregates::Review;
use crate::error::Result;
use crate::state::AppContext;
use crate::store::ReviewWithAuthor;
use crate::workflow::review::{self, ReviewInput};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 50;

pub async fn create(
    State(ctx): State<AppContext>,
    identity: Identity,
    Path(raw_id): Path<String>,
    Json(input): Json<ReviewInput>,
) -> Result<(StatusCode, Json<Review>)> {
    input.validate()?;
    let product_id = parse_id(&raw_id, "product")?;
    let created = review::add_review(&ctx, identity.user_id, product_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PaginatedResponse<ReviewWithAuthor>>> {
    let product_id = parse_id(&raw_id, "product")?;
    let (page, limit) = params.resolve(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let (reviews, total) = review::list_reviews(&ctx, product_id, page, limit).await?;
    Ok(Json(PaginatedResponse::new(reviews, total, page, limit)))
}
