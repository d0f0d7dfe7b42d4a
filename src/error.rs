//! Application error taxonomy and its HTTP mapping.
//!
//! Validation failures are detected before any mutation and short-circuit
//! with no side effect. Storage errors surface to clients as a generic
//! message; the detail goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::domain::aggregates::{CartError, OrderError};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("malformed {0} identifier")]
    InvalidIdentifier(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("not enough stock available")]
    InsufficientStock,

    #[error("you have already reviewed this product")]
    DuplicateReview,

    #[error("your cart is empty")]
    EmptyCart,

    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier(_)
            | Self::InsufficientStock
            | Self::DuplicateReview
            | Self::EmptyCart
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::ItemNotFound => AppError::NotFound("cart item"),
            CartError::InsufficientStock => AppError::InsufficientStock,
        }
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e { OrderError::Empty => AppError::EmptyCart }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::InvalidIdentifier("product").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InsufficientStock.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DuplicateReview.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmptyCart.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("product").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthenticated("login required").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("nope").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Storage(sqlx::Error::PoolClosed).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_cart_error_conversion() {
        assert!(matches!(AppError::from(CartError::InsufficientStock), AppError::InsufficientStock));
        assert!(matches!(AppError::from(CartError::ItemNotFound), AppError::NotFound(_)));
        assert!(matches!(AppError::from(OrderError::Empty), AppError::EmptyCart));
    }
}
