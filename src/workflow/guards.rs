//! Role and ownership guards: pure predicates over already-loaded state.

use uuid::Uuid;

use crate::domain::aggregates::{Product, Role};
use crate::error::{AppError, Result};

/// Coarse role gate, applied before any ownership check.
pub fn require_seller(role: Role) -> Result<()> {
    if role.is_seller() {
        Ok(())
    } else {
        Err(AppError::Forbidden("seller account required"))
    }
}

/// A product may only be edited or deleted by its author.
pub fn require_author(product: &Product, user_id: Uuid) -> Result<()> {
    if product.owned_by(user_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden("only the product's author may modify it"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_seller_gate() {
        assert!(require_seller(Role::Seller).is_ok());
        assert!(matches!(require_seller(Role::Buyer), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_author_gate() {
        let author = Uuid::new_v4();
        let product = Product::create("Widget", "A widget", Decimal::new(100, 0), 1, "tools", None, author);
        assert!(require_author(&product, author).is_ok());
        assert!(matches!(require_author(&product, Uuid::new_v4()), Err(AppError::Forbidden(_))));
    }
}
