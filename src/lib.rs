//! Storefront - self-hosted e-commerce service
//!
//! Product catalog browsing, per-user carts, checkout into immutable
//! orders, reviews, and wishlists, served as JSON over HTTP and backed
//! by Postgres.
//!
//! The interesting part is the cart and order consistency model: cart
//! and wishlist mutations are single-row writes against the embedded
//! user document, while checkout and product deletion run as explicit
//! transactions so stock, order, and cart can never land partially.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod state;
pub mod store;
pub mod workflow;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use state::AppContext;
