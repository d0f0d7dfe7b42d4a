//! Checkout and order history handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::identity::Identity;
use crate::api::{parse_id, PageParams, PaginatedResponse};
use crate::domain::aggregates::Order;
use crate::error::{AppError, Result};
use crate::state::AppContext;
use crate::workflow;

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 50;

pub async fn checkout(State(ctx): State<AppContext>, identity: Identity) -> Result<(StatusCode, Json<Order>)> {
    let order = workflow::checkout::place_order(&ctx, identity.user_id).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn history(
    State(ctx): State<AppContext>,
    identity: Identity,
    Query(params): Query<PageParams>,
) -> Result<Json<PaginatedResponse<Order>>> {
    let (page, limit) = params.resolve(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let (orders, total) = ctx.orders.list_for_user(identity.user_id, page, limit).await?;
    Ok(Json(PaginatedResponse::new(orders, total, page, limit)))
}

pub async fn show(
    State(ctx): State<AppContext>,
    identity: Identity,
    Path(raw_id): Path<String>,
) -> Result<Json<Order>> {
    let id = parse_id(&raw_id, "order")?;
    let order = ctx.orders.find(id).await?.ok_or(AppError::NotFound("order"))?;
    if order.user_id != identity.user_id {
        return Err(AppError::Forbidden("you may only view your own orders"));
    }
    Ok(Json(order))
}
