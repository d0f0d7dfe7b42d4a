//! Product collection access.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::aggregates::Product;
use crate::error::Result;

const MAX_PAGE_SIZE: u32 = 50;
const DEFAULT_PAGE_SIZE: u32 = 12;

/// Catalog listing filters, deserialized straight from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl CatalogFilter {
    pub fn page(&self) -> u32 { self.page.unwrap_or(1).max(1) }
    pub fn limit(&self) -> u32 { self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE) }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedAt,
    Price,
    Name,
}

impl SortKey {
    /// Whitelisted column name; filters never reach the SQL text directly.
    fn column(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::Price => "price",
            SortKey::Name => "name",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self { SortOrder::Asc => "ASC", SortOrder::Desc => "DESC" }
    }
}

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub products: i64,
}

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct CatalogStats {
    pub total_products: i64,
    pub average_price: Option<Decimal>,
    pub total_categories: i64,
}

#[derive(Clone)]
pub struct ProductStore {
    pool: PgPool,
}

impl ProductStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    pub async fn find(&self, id: Uuid) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    /// Resolve a batch of product references; missing ids are simply
    /// absent from the map (stale cart and wishlist entries).
    pub async fn resolve_many(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Product>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(products.into_iter().map(|p| (p.id, p)).collect())
    }

    pub async fn search(&self, filter: &CatalogFilter) -> Result<(Vec<Product>, i64)> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query.build_query_scalar().fetch_one(&self.pool).await?;

        let limit = i64::from(filter.limit());
        let offset = (i64::from(filter.page()) - 1) * limit;
        let mut query = QueryBuilder::new("SELECT * FROM products");
        push_filters(&mut query, filter);
        query.push(" ORDER BY ");
        query.push(filter.sort_by.column());
        query.push(" ");
        query.push(filter.sort_order.keyword());
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);
        let products = query.build_query_as::<Product>().fetch_all(&self.pool).await?;

        Ok((products, total))
    }

    pub async fn create(&self, product: &Product) -> Result<()> {
        sqlx::query(
            "INSERT INTO products (id, name, description, price, stock, category, image_url, author_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.category)
        .bind(&product.image_url)
        .bind(product.author_id)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, product: &Product) -> Result<()> {
        sqlx::query(
            "UPDATE products SET name = $2, description = $3, price = $4, stock = $5, \
             category = $6, image_url = $7, updated_at = NOW() WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.category)
        .bind(&product.image_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a product and every review it references in one
    /// transaction, so no orphaned review can survive. Returns the
    /// number of reviews deleted.
    pub async fn delete_cascading(&self, id: Uuid) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let reviews_deleted = sqlx::query("DELETE FROM reviews WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(reviews_deleted)
    }

    pub async fn categories(&self) -> Result<Vec<CategoryCount>> {
        let counts = sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS products FROM products GROUP BY category ORDER BY products DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }

    pub async fn stats(&self) -> Result<CatalogStats> {
        let stats = sqlx::query_as::<_, CatalogStats>(
            "SELECT COUNT(*) AS total_products, AVG(price) AS average_price, \
             COUNT(DISTINCT category) AS total_categories FROM products",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}

fn push_filters<'args>(query: &mut QueryBuilder<'args, Postgres>, filter: &'args CatalogFilter) {
    let mut separator = " WHERE ";
    if let Some(category) = &filter.category {
        query.push(separator).push("category = ").push_bind(category);
        separator = " AND ";
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query
            .push(separator)
            .push("(name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
        separator = " AND ";
    }
    if let Some(min_price) = filter.min_price {
        query.push(separator).push("price >= ").push_bind(min_price);
        separator = " AND ";
    }
    if let Some(max_price) = filter.max_price {
        query.push(separator).push("price <= ").push_bind(max_price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_and_limit_are_clamped() {
        let filter = CatalogFilter { page: Some(0), limit: Some(500), ..Default::default() };
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), MAX_PAGE_SIZE);
        let filter = CatalogFilter::default();
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_sort_columns_are_whitelisted() {
        assert_eq!(SortKey::CreatedAt.column(), "created_at");
        assert_eq!(SortKey::Price.column(), "price");
        assert_eq!(SortKey::Name.column(), "name");
        assert_eq!(SortOrder::Asc.keyword(), "ASC");
        assert_eq!(SortOrder::Desc.keyword(), "DESC");
    }

    #[test]
    fn test_filter_deserializes_query_values() {
        let filter: CatalogFilter = serde_json::from_value(serde_json::json!({
            "category": "tools",
            "search": "widget",
            "min_price": "5",
            "sort_by": "price",
            "sort_order": "asc",
        }))
        .unwrap();
        assert_eq!(filter.category.as_deref(), Some("tools"));
        assert_eq!(filter.min_price, Some(Decimal::new(5, 0)));
        assert!(matches!(filter.sort_by, SortKey::Price));
        assert!(matches!(filter.sort_order, SortOrder::Asc));
    }
}
