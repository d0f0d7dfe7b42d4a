//! HTTP boundary: routing, payload validation, identity resolution.
//!
//! Handlers translate workflow results into status codes and JSON
//! bodies; they never carry domain rules of their own.

pub mod accounts;
pub mod cart;
pub mod identity;
pub mod orders;
pub mod pages;
pub mod products;
pub mod reviews;
pub mod wishlist;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::state::AppContext;

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(accounts::register))
        .route("/api/v1/auth/login", post(accounts::login))
        .route("/api/v1/auth/profile", get(accounts::profile).patch(accounts::update_profile))
        .route("/api/v1/products", get(products::list).post(products::create))
        .route(
            "/api/v1/products/:id",
            get(products::show).patch(products::update).delete(products::remove),
        )
        .route("/api/v1/products/:id/reviews", get(reviews::list).post(reviews::create))
        .route("/api/v1/products/:id/wishlist", post(wishlist::toggle))
        .route("/api/v1/wishlist", get(wishlist::list))
        .route("/api/v1/categories", get(products::categories))
        .route("/api/v1/stats", get(products::stats))
        .route("/api/v1/cart", get(cart::show).delete(cart::clear))
        .route("/api/v1/cart/count", get(cart::count))
        .route("/api/v1/cart/:product_id", post(cart::add).patch(cart::update).delete(cart::remove))
        .route("/api/v1/checkout", post(orders::checkout))
        .route("/api/v1/orders", get(orders::history))
        .route("/api/v1/orders/:id", get(orders::show))
        .route("/api/v1/pages/about", get(pages::about))
        .route("/api/v1/pages/faq", get(pages::faq))
        .route("/api/v1/pages/contact", get(pages::contact))
        .with_state(ctx)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": "storefront" }))
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: u32, limit: u32) -> Self {
        let total_pages = if total <= 0 { 0 } else { ((total - 1) / i64::from(limit) + 1) as u32 };
        Self { data, total, page, total_pages }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    pub fn resolve(&self, default_limit: u32, max_limit: u32) -> (u32, u32) {
        (
            self.page.unwrap_or(1).max(1),
            self.limit.unwrap_or(default_limit).clamp(1, max_limit),
        )
    }
}

/// Identifiers arrive as path strings; anything that does not parse is a
/// malformed reference, rejected before any storage access.
pub(crate) fn parse_id(raw: &str, what: &'static str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidIdentifier(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert!(parse_id("not-a-uuid", "product").is_err());
        assert!(parse_id("0192f0c1-5a8d-7cc3-b611-45a3f9a7c802", "product").is_ok());
    }

    #[test]
    fn test_total_pages_math() {
        assert_eq!(PaginatedResponse::<()>::new(vec![], 0, 1, 12).total_pages, 0);
        assert_eq!(PaginatedResponse::<()>::new(vec![], 12, 1, 12).total_pages, 1);
        assert_eq!(PaginatedResponse::<()>::new(vec![], 13, 1, 12).total_pages, 2);
    }

    #[test]
    fn test_page_params_clamped() {
        let params = PageParams { page: Some(0), limit: Some(9999) };
        assert_eq!(params.resolve(10, 50), (1, 50));
        assert_eq!(PageParams::default().resolve(10, 50), (1, 10));
    }
}
