//! Aggregates module
pub mod cart;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use cart::{Cart, CartEntry, CartError, CartLine, CartSummary};
pub use order::{LineItem, Order, OrderError};
pub use product::Product;
pub use review::Review;
pub use user::{Role, User};
