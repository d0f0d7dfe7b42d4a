//! Catalog handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use crate::api::identity::Identity;
use crate::api::{parse_id, PaginatedResponse};
use crate::domain::aggregates::Product;
use crate::error::{AppError, Result};
use crate::state::AppContext;
use crate::store::{CatalogFilter, CatalogStats, CategoryCount, ReviewWithAuthor};
use crate::workflow::catalog::{self, ProductInput};

const EMBEDDED_REVIEW_LIMIT: u32 = 10;

pub async fn list(
    State(ctx): State<AppContext>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<PaginatedResponse<Product>>> {
    let (products, total) = ctx.products.search(&filter).await?;
    Ok(Json(PaginatedResponse::new(products, total, filter.page(), filter.limit())))
}

#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub author: Option<String>,
    pub reviews: Vec<ReviewWithAuthor>,
    pub review_count: i64,
}

pub async fn show(State(ctx): State<AppContext>, Path(raw_id): Path<String>) -> Result<Json<ProductDetail>> {
    let id = parse_id(&raw_id, "product")?;
    let product = ctx.products.find(id).await?.ok_or(AppError::NotFound("product"))?;
    let author = ctx.users.find(product.author_id).await?.map(|u| u.username);
    let (reviews, review_count) = ctx.reviews.list_for_product(id, 1, EMBEDDED_REVIEW_LIMIT).await?;
    Ok(Json(ProductDetail { product, author, reviews, review_count }))
}

pub async fn create(
    State(ctx): State<AppContext>,
    identity: Identity,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    input.validate()?;
    let product = catalog::create_product(&ctx, identity.user_id, identity.role, input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    State(ctx): State<AppContext>,
    identity: Identity,
    Path(raw_id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    input.validate()?;
    let id = parse_id(&raw_id, "product")?;
    let product = catalog::update_product(&ctx, identity.user_id, identity.role, id, input).await?;
    Ok(Json(product))
}

pub async fn remove(
    State(ctx): State<AppContext>,
    identity: Identity,
    Path(raw_id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&raw_id, "product")?;
    catalog::delete_product(&ctx, identity.user_id, identity.role, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn categories(State(ctx): State<AppContext>) -> Result<Json<Vec<CategoryCount>>> {
    Ok(Json(ctx.products.categories().await?))
}

#[derive(Debug, Serialize)]
pub struct StoreStats {
    #[serde(flatten)]
    pub catalog: CatalogStats,
    pub total_users: i64,
}

pub async fn stats(State(ctx): State<AppContext>) -> Result<Json<StoreStats>> {
    let catalog = ctx.products.stats().await?;
    let total_users = ctx.users.count().await?;
    Ok(Json(StoreStats { catalog, total_users }))
}
