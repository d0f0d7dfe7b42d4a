//! Cart mutation operations.
//!
//! Every mutating call re-resolves the product and re-checks stock; the
//! check is never cached, since stock is a shared, frequently-changing
//! resource. Each mutation persists the whole embedded cart in a single
//! user-row write.

use uuid::Uuid;

use crate::domain::aggregates::CartSummary;
use crate::error::{AppError, Result};
use crate::state::AppContext;

pub async fn add_item(ctx: &AppContext, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<i32> {
    let product = ctx.products.find(product_id).await?.ok_or(AppError::NotFound("product"))?;
    let mut user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    let new_quantity = user.cart.add(product_id, quantity, product.stock)?;
    ctx.users.save_cart(user_id, &user.cart).await?;
    Ok(new_quantity)
}

pub async fn set_quantity(ctx: &AppContext, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<i32> {
    let product = ctx.products.find(product_id).await?.ok_or(AppError::NotFound("product"))?;
    let mut user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    let new_quantity = user.cart.set_quantity(product_id, quantity, product.stock)?;
    ctx.users.save_cart(user_id, &user.cart).await?;
    Ok(new_quantity)
}

/// Removing an item that is not in the cart is a no-op success.
pub async fn remove_item(ctx: &AppContext, user_id: Uuid, product_id: Uuid) -> Result<()> {
    let mut user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    user.cart.remove(product_id);
    ctx.users.save_cart(user_id, &user.cart).await?;
    Ok(())
}

pub async fn clear(ctx: &AppContext, user_id: Uuid) -> Result<()> {
    let mut user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    user.cart.clear();
    ctx.users.save_cart(user_id, &user.cart).await?;
    Ok(())
}

pub async fn summary(ctx: &AppContext, user_id: Uuid) -> Result<CartSummary> {
    let user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    let catalog = ctx.products.resolve_many(&user.cart.product_ids()).await?;
    Ok(user.cart.summarize(&catalog, &ctx.config.currency))
}

pub async fn item_count(ctx: &AppContext, user_id: Uuid) -> Result<i32> {
    let user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    Ok(user.cart.item_count())
}
