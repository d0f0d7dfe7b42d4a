//! Cart handlers. Every route requires a resolved identity.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::identity::Identity;
use crate::api::parse_id;
use crate::domain::aggregates::CartSummary;
use crate::error::Result;
use crate::state::AppContext;
use crate::workflow;

#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartBody {
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 10, message = "quantity must be between 1 and 10"))]
    pub quantity: i32,
}

fn default_quantity() -> i32 { 1 }

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartBody {
    #[validate(range(min = 1, max = 10, message = "quantity must be between 1 and 10"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct CartChange {
    pub message: &'static str,
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: i32,
}

pub async fn show(State(ctx): State<AppContext>, identity: Identity) -> Result<Json<CartSummary>> {
    Ok(Json(workflow::cart::summary(&ctx, identity.user_id).await?))
}

pub async fn count(State(ctx): State<AppContext>, identity: Identity) -> Result<Json<CartCount>> {
    let count = workflow::cart::item_count(&ctx, identity.user_id).await?;
    Ok(Json(CartCount { count }))
}

pub async fn add(
    State(ctx): State<AppContext>,
    identity: Identity,
    Path(raw_id): Path<String>,
    Json(body): Json<AddToCartBody>,
) -> Result<(StatusCode, Json<CartChange>)> {
    body.validate()?;
    let product_id = parse_id(&raw_id, "product")?;
    let quantity = workflow::cart::add_item(&ctx, identity.user_id, product_id, body.quantity).await?;
    Ok((StatusCode::CREATED, Json(CartChange { message: "item added to cart", quantity })))
}

pub async fn update(
    State(ctx): State<AppContext>,
    identity: Identity,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdateCartBody>,
) -> Result<Json<CartChange>> {
    body.validate()?;
    let product_id = parse_id(&raw_id, "product")?;
    let quantity = workflow::cart::set_quantity(&ctx, identity.user_id, product_id, body.quantity).await?;
    Ok(Json(CartChange { message: "cart updated", quantity }))
}

pub async fn remove(
    State(ctx): State<AppContext>,
    identity: Identity,
    Path(raw_id): Path<String>,
) -> Result<StatusCode> {
    let product_id = parse_id(&raw_id, "product")?;
    workflow::cart::remove_item(&ctx, identity.user_id, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear(State(ctx): State<AppContext>, identity: Identity) -> Result<StatusCode> {
    workflow::cart::clear(&ctx, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_defaults_to_one() {
        let body: AddToCartBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.quantity, 1);
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_quantity_bounds() {
        let zero: AddToCartBody = serde_json::from_str(r#"{"quantity": 0}"#).unwrap();
        assert!(zero.validate().is_err());
        let eleven: AddToCartBody = serde_json::from_str(r#"{"quantity": 11}"#).unwrap();
        assert!(eleven.validate().is_err());
        let ten: AddToCartBody = serde_json::from_str(r#"{"quantity": 10}"#).unwrap();
        assert!(ten.validate().is_ok());
    }
}
