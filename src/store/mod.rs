//! Postgres-backed stores, one per collection.
//!
//! Each store needs no more than single-row atomicity from the database;
//! the two multi-step sequences that must not land partially (checkout,
//! product-delete cascade) run inside explicit transactions.

mod orders;
mod products;
mod reviews;
mod users;

pub use orders::OrderStore;
pub use products::{CatalogFilter, CatalogStats, CategoryCount, ProductStore, SortKey, SortOrder};
pub use reviews::{ReviewStore, ReviewWithAuthor};
pub use users::UserStore;
