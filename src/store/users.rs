//! User collection access.
//!
//! The cart and wishlist are embedded in the user row as JSONB, so every
//! cart or wishlist write is a single-row update with the same atomicity
//! a document store would give the user document.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::aggregates::{Cart, Role, User};
use crate::error::{AppError, Result};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    cart: Json<Cart>,
    wishlist: Json<Vec<Uuid>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            role: Role::parse(&row.role),
            cart: row.cart.0,
            wishlist: row.wishlist.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    pub async fn find(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    pub async fn create(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, role, cart, wishlist, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(Json(&user.cart))
        .bind(Json(&user.wishlist))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(unique_to_taken)?;
        Ok(())
    }

    /// Persist the embedded cart. One row, one write.
    pub async fn save_cart(&self, user_id: Uuid, cart: &Cart) -> Result<()> {
        sqlx::query("UPDATE users SET cart = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(Json(cart))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn save_wishlist(&self, user_id: Uuid, wishlist: &[Uuid]) -> Result<()> {
        sqlx::query("UPDATE users SET wishlist = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(Json(wishlist))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_email(&self, user_id: Uuid, email: &str) -> Result<()> {
        sqlx::query("UPDATE users SET email = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(unique_to_taken)?;
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn unique_to_taken(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Validation("username or email already exists".into())
        }
        other => AppError::Storage(other),
    }
}
