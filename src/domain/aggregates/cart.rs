//! Cart Aggregate
//!
//! The working set of product selections embedded in a user document.
//! Entries hold weak references to catalog products; quantities are
//! checked against the product's stock at mutation time, never reserved.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::aggregates::Product;
use crate::domain::value_objects::Money;

/// One cart line: a product reference plus a quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// A user's cart. At most one entry per distinct product.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartEntry>);

impl Cart {
    pub fn entries(&self) -> &[CartEntry] { &self.0 }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn product_ids(&self) -> Vec<Uuid> { self.0.iter().map(|e| e.product_id).collect() }

    /// Quantity currently carried for a product, zero when absent.
    pub fn quantity_of(&self, product_id: Uuid) -> i32 {
        self.0.iter().find(|e| e.product_id == product_id).map_or(0, |e| e.quantity)
    }

    /// Total number of units across all entries.
    pub fn item_count(&self) -> i32 { self.0.iter().map(|e| e.quantity).sum() }

    /// Add `quantity` units of a product, merging into an existing entry
    /// rather than creating a duplicate. `stock` is the product's stock at
    /// the time of the call; the merged quantity may not exceed it.
    pub fn add(&mut self, product_id: Uuid, quantity: i32, stock: i32) -> Result<i32, CartError> {
        let merged = self.quantity_of(product_id) + quantity;
        if merged > stock { return Err(CartError::InsufficientStock); }
        match self.0.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => entry.quantity = merged,
            None => self.0.push(CartEntry { product_id, quantity }),
        }
        Ok(merged)
    }

    /// Set an existing entry to an absolute quantity, bounded by `stock`.
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: i32, stock: i32) -> Result<i32, CartError> {
        if quantity > stock { return Err(CartError::InsufficientStock); }
        let entry = self.0.iter_mut().find(|e| e.product_id == product_id).ok_or(CartError::ItemNotFound)?;
        entry.quantity = quantity;
        Ok(quantity)
    }

    /// Remove at most one entry for the product; only the first match goes,
    /// so a stored cart that ever held duplicates sheds one per call.
    /// Removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: Uuid) {
        if let Some(pos) = self.0.iter().position(|e| e.product_id == product_id) {
            self.0.remove(pos);
        }
    }

    pub fn clear(&mut self) { self.0.clear(); }

    /// Join entries against the live catalog. Entries whose product no
    /// longer resolves are skipped, not treated as an error.
    pub fn summarize(&self, catalog: &HashMap<Uuid, Product>, currency: &str) -> CartSummary {
        let mut lines = Vec::new();
        let mut total = Money::zero(currency);
        let mut total_items = 0;
        for entry in &self.0 {
            let Some(product) = catalog.get(&entry.product_id) else { continue };
            let unit_price = Money::new(product.price, currency);
            let line_total = unit_price.multiply(entry.quantity as u32);
            total = total.add(&line_total).unwrap_or(total);
            total_items += entry.quantity;
            lines.push(CartLine {
                product_id: entry.product_id,
                name: product.name.clone(),
                quantity: entry.quantity,
                unit_price,
                line_total,
            });
        }
        CartSummary { lines, total, total_items }
    }
}

/// A cart entry resolved against the catalog at read time.
#[derive(Clone, Debug, Serialize)]
pub struct CartLine {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Derived cart view: totals are computed on every read, never stored.
#[derive(Clone, Debug, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub total_items: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum CartError { ItemNotFound, InsufficientStock }
impl std::error::Error for CartError {}
impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound => write!(f, "Item not found in cart"),
            Self::InsufficientStock => write!(f, "Not enough stock available"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(id: Uuid, name: &str, price: Decimal, stock: i32) -> Product {
        Product {
            id,
            name: name.into(),
            description: String::new(),
            price,
            stock,
            category: "misc".into(),
            image_url: None,
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_merges_existing_entry() {
        let mut cart = Cart::default();
        let id = Uuid::new_v4();
        cart.add(id, 2, 10).unwrap();
        cart.add(id, 1, 10).unwrap();
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.quantity_of(id), 3);
    }

    #[test]
    fn test_add_respects_stock_bound() {
        let mut cart = Cart::default();
        let id = Uuid::new_v4();
        cart.add(id, 2, 3).unwrap();
        // 2 + 2 > 3, and the cart is left untouched
        assert_eq!(cart.add(id, 2, 3), Err(CartError::InsufficientStock));
        assert_eq!(cart.quantity_of(id), 2);
    }

    #[test]
    fn test_add_exact_stock_boundary_succeeds() {
        let mut cart = Cart::default();
        let id = Uuid::new_v4();
        cart.add(id, 2, 5).unwrap();
        assert_eq!(cart.add(id, 3, 5), Ok(5));
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::default();
        let id = Uuid::new_v4();
        cart.add(id, 1, 10).unwrap();
        assert_eq!(cart.set_quantity(id, 7, 10), Ok(7));
        assert_eq!(cart.set_quantity(id, 11, 10), Err(CartError::InsufficientStock));
        assert_eq!(cart.set_quantity(Uuid::new_v4(), 1, 10), Err(CartError::ItemNotFound));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::default();
        let id = Uuid::new_v4();
        cart.add(id, 2, 10).unwrap();
        cart.remove(Uuid::new_v4());
        assert_eq!(cart.quantity_of(id), 2);
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let id = Uuid::new_v4();
        let mut cart = Cart(vec![
            CartEntry { product_id: id, quantity: 1 },
            CartEntry { product_id: id, quantity: 4 },
        ]);
        cart.remove(id);
        assert_eq!(cart.entries(), &[CartEntry { product_id: id, quantity: 4 }]);
    }

    #[test]
    fn test_clear_then_total_is_zero() {
        let mut cart = Cart::default();
        let id = Uuid::new_v4();
        cart.add(id, 2, 10).unwrap();
        cart.clear();
        let catalog = HashMap::from([(id, product(id, "Widget", Decimal::new(10, 0), 10))]);
        let summary = cart.summarize(&catalog, "USD");
        assert_eq!(summary.total.amount(), Decimal::ZERO);
        assert!(summary.lines.is_empty());
    }

    #[test]
    fn test_summary_totals() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(a, 2, 10).unwrap();
        cart.add(b, 1, 10).unwrap();
        let catalog = HashMap::from([
            (a, product(a, "Widget", Decimal::new(10, 0), 10)),
            (b, product(b, "Gadget", Decimal::new(5, 0), 10)),
        ]);
        let summary = cart.summarize(&catalog, "USD");
        assert_eq!(summary.total.amount(), Decimal::new(25, 0));
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.total_items, 3);
    }

    #[test]
    fn test_summary_skips_stale_references() {
        let live = Uuid::new_v4();
        let deleted = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(live, 1, 10).unwrap();
        cart.add(deleted, 3, 10).unwrap();
        let catalog = HashMap::from([(live, product(live, "Widget", Decimal::new(10, 0), 10))]);
        let summary = cart.summarize(&catalog, "USD");
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.total.amount(), Decimal::new(10, 0));
        assert_eq!(summary.total_items, 1);
    }
}
