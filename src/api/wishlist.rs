//! Wishlist handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::identity::Identity;
use crate::api::parse_id;
use crate::domain::aggregates::Product;
use crate::error::Result;
use crate::state::AppContext;
use crate::workflow;

#[derive(Debug, Serialize)]
pub struct WishlistChange {
    pub in_wishlist: bool,
    pub message: &'static str,
}

pub async fn toggle(
    State(ctx): State<AppContext>,
    identity: Identity,
    Path(raw_id): Path<String>,
) -> Result<Json<WishlistChange>> {
    let product_id = parse_id(&raw_id, "product")?;
    let in_wishlist = workflow::account::toggle_wishlist(&ctx, identity.user_id, product_id).await?;
    let message = if in_wishlist { "product added to wishlist" } else { "product removed from wishlist" };
    Ok(Json(WishlistChange { in_wishlist, message }))
}

pub async fn list(State(ctx): State<AppContext>, identity: Identity) -> Result<Json<Vec<Product>>> {
    Ok(Json(workflow::account::wishlist_products(&ctx, identity.user_id).await?))
}
