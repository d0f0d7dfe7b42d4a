//! Account operations: registration, credential verification, profile,
//! and wishlist. Session issuance lives with the external identity
//! provider; this service only stores the credential hash and verifies
//! it on request.

use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::aggregates::{Product, Role, User};
use crate::error::{AppError, Result};
use crate::state::AppContext;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 3, max = 30), custom = "alphanumeric")]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6 to 128 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(email)]
    pub email: Option<String>,
}

fn alphanumeric(username: &str) -> std::result::Result<(), ValidationError> {
    if username.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("username must be alphanumeric"))
    }
}

pub async fn register(ctx: &AppContext, input: RegisterInput) -> Result<User> {
    let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(Box::new(e)))?;
    let user = User::register(input.username, input.email, password_hash, input.role);
    ctx.users.create(&user).await?;
    Ok(user)
}

/// Check a username/password pair against the stored hash. The caller
/// (the session provider) turns the returned account into a session.
pub async fn verify_credentials(ctx: &AppContext, input: LoginInput) -> Result<User> {
    let user = ctx
        .users
        .find_by_username(&input.username)
        .await?
        .ok_or(AppError::Unauthenticated("invalid username or password"))?;
    let matches = bcrypt::verify(&input.password, &user.password_hash)
        .map_err(|e| AppError::Internal(Box::new(e)))?;
    if !matches {
        return Err(AppError::Unauthenticated("invalid username or password"));
    }
    Ok(user)
}

pub async fn update_profile(ctx: &AppContext, user_id: Uuid, input: ProfileInput) -> Result<User> {
    let mut user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    if let Some(email) = input.email {
        ctx.users.update_email(user_id, &email).await?;
        user.email = email;
    }
    Ok(user)
}

/// Flip a product in or out of the wishlist. Returns whether the product
/// is in the wishlist after the call.
pub async fn toggle_wishlist(ctx: &AppContext, user_id: Uuid, product_id: Uuid) -> Result<bool> {
    if ctx.products.find(product_id).await?.is_none() {
        return Err(AppError::NotFound("product"));
    }
    let mut user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    let in_wishlist = user.toggle_wishlist(product_id);
    ctx.users.save_wishlist(user_id, &user.wishlist).await?;
    Ok(in_wishlist)
}

/// Resolve the wishlist against the live catalog, keeping the user's
/// ordering and skipping references to deleted products.
pub async fn wishlist_products(ctx: &AppContext, user_id: Uuid) -> Result<Vec<Product>> {
    let user = ctx.users.find(user_id).await?.ok_or(AppError::NotFound("user"))?;
    let catalog = ctx.products.resolve_many(&user.wishlist).await?;
    Ok(user.wishlist.iter().filter_map(|id| catalog.get(id).cloned()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_input() -> RegisterInput {
        RegisterInput {
            username: "sam42".into(),
            email: "sam@example.com".into(),
            password: "hunter22".into(),
            role: Role::Buyer,
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(register_input().validate().is_ok());
    }

    #[test]
    fn test_username_must_be_alphanumeric() {
        let mut bad = register_input();
        bad.username = "sam 42!".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut bad = register_input();
        bad.password = "abc".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut bad = register_input();
        bad.email = "not-an-email".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_role_defaults_to_buyer() {
        let input: RegisterInput = serde_json::from_value(serde_json::json!({
            "username": "sam42",
            "email": "sam@example.com",
            "password": "hunter22",
        }))
        .unwrap();
        assert_eq!(input.role, Role::Buyer);
    }
}
