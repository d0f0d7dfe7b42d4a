//! Catalog mutations: seller-gated, author-owned.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::aggregates::{Product, Role};
use crate::domain::events::DomainEvent;
use crate::error::{AppError, Result};
use crate::state::AppContext;
use crate::workflow::guards::{require_author, require_seller};

#[derive(Debug, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(length(min = 10, max = 1000))]
    pub description: String,
    #[validate(custom = "non_negative_price")]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(url)]
    pub image_url: Option<String>,
}

fn non_negative_price(price: &Decimal) -> std::result::Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("price must be non-negative"));
    }
    Ok(())
}

pub async fn create_product(ctx: &AppContext, author_id: Uuid, role: Role, input: ProductInput) -> Result<Product> {
    require_seller(role)?;
    let product = Product::create(
        input.name,
        input.description,
        input.price,
        input.stock,
        input.category,
        input.image_url,
        author_id,
    );
    ctx.products.create(&product).await?;
    ctx.publish(DomainEvent::ProductCreated { product_id: product.id, author_id }).await;
    Ok(product)
}

pub async fn update_product(
    ctx: &AppContext,
    actor_id: Uuid,
    role: Role,
    product_id: Uuid,
    input: ProductInput,
) -> Result<Product> {
    require_seller(role)?;
    let mut product = ctx.products.find(product_id).await?.ok_or(AppError::NotFound("product"))?;
    require_author(&product, actor_id)?;
    product.name = input.name;
    product.description = input.description;
    product.price = input.price;
    product.stock = input.stock;
    product.category = input.category;
    product.image_url = input.image_url;
    product.updated_at = Utc::now();
    ctx.products.update(&product).await?;
    Ok(product)
}

/// Deletes the product and its reviews together; carts holding the
/// product are left with a stale reference that reads resolve away.
pub async fn delete_product(ctx: &AppContext, actor_id: Uuid, role: Role, product_id: Uuid) -> Result<()> {
    require_seller(role)?;
    let product = ctx.products.find(product_id).await?.ok_or(AppError::NotFound("product"))?;
    require_author(&product, actor_id)?;
    let reviews_deleted = ctx.products.delete_cascading(product_id).await?;
    ctx.publish(DomainEvent::ProductDeleted { product_id, reviews_deleted }).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            name: "Widget".into(),
            description: "A dependable widget".into(),
            price: Decimal::new(999, 2),
            stock: 5,
            category: "tools".into(),
            image_url: None,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut bad = input();
        bad.price = Decimal::new(-1, 0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_short_name_rejected() {
        let mut bad = input();
        bad.name = "ab".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_negative_stock_rejected() {
        let mut bad = input();
        bad.stock = -1;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_bad_image_url_rejected() {
        let mut bad = input();
        bad.image_url = Some("not a url".into());
        assert!(bad.validate().is_err());
    }
}
