//! User Aggregate
//!
//! A user document owns its embedded cart and wishlist exclusively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::aggregates::Cart;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
}

impl Role {
    pub fn is_seller(self) -> bool { matches!(self, Role::Seller) }

    pub fn as_str(self) -> &'static str {
        match self { Role::Buyer => "buyer", Role::Seller => "seller" }
    }

    pub fn parse(raw: &str) -> Self {
        match raw { "seller" => Role::Seller, _ => Role::Buyer }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub cart: Cart,
    pub wishlist: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn register(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: String,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            email: email.into(),
            password_hash,
            role,
            cart: Cart::default(),
            wishlist: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Flip wishlist membership for a product. Returns true when the
    /// product is in the wishlist after the call. Set semantics: a second
    /// add never duplicates.
    pub fn toggle_wishlist(&mut self, product_id: Uuid) -> bool {
        if let Some(pos) = self.wishlist.iter().position(|id| *id == product_id) {
            self.wishlist.remove(pos);
            false
        } else {
            self.wishlist.push(product_id);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("seller"), Role::Seller);
        assert_eq!(Role::parse("buyer"), Role::Buyer);
        assert_eq!(Role::parse("garbage"), Role::Buyer);
    }

    #[test]
    fn test_wishlist_toggle() {
        let mut user = User::register("sam", "sam@example.com", "hash".into(), Role::Buyer);
        let id = Uuid::new_v4();
        assert!(user.toggle_wishlist(id));
        assert_eq!(user.wishlist, vec![id]);
        assert!(!user.toggle_wishlist(id));
        assert!(user.wishlist.is_empty());
        assert!(user.toggle_wishlist(id));
        assert_eq!(user.wishlist, vec![id]);
    }
}
