/*
 * Responsibility
 * - products CRUD plus the catalog queries (category filter, count, featured)
 * - category_id FK is RESTRICT: deleting a category still in use is a Conflict
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub image: String,
    pub brand: String,
    pub price: f64,
    pub category_id: Uuid,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub image: String,
    pub brand: String,
    pub price: f64,
    pub category_id: Uuid,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
}

/// Partial update: `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rich_description: Option<String>,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<Uuid>,
    pub count_in_stock: Option<i32>,
    pub rating: Option<f64>,
    pub num_reviews: Option<i32>,
    pub is_featured: Option<bool>,
}

#[async_trait]
pub trait ProductRepo: Send + Sync {
    /// Empty `category_ids` means no filter.
    async fn list(&self, category_ids: &[Uuid]) -> RepoResult<Vec<ProductRow>>;
    async fn get(&self, id: Uuid) -> RepoResult<Option<ProductRow>>;
    async fn get_many(&self, ids: &[Uuid]) -> RepoResult<Vec<ProductRow>>;
    async fn create(&self, product: NewProduct) -> RepoResult<ProductRow>;
    async fn update(&self, id: Uuid, patch: ProductPatch) -> RepoResult<Option<ProductRow>>;
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
    async fn count(&self) -> RepoResult<i64>;
    async fn featured(&self, limit: i64) -> RepoResult<Vec<ProductRow>>;
}

const PRODUCT_COLUMNS: &str = r#"
    id, name, description, rich_description, image, brand, price, category_id,
    count_in_stock, rating, num_reviews, is_featured, created_at
"#;

#[derive(Clone, Debug)]
pub struct PgProductRepo {
    pool: PgPool,
}

impl PgProductRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepo for PgProductRepo {
    async fn list(&self, category_ids: &[Uuid]) -> RepoResult<Vec<ProductRow>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE cardinality($1::uuid[]) = 0 OR category_id = ANY($1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(category_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<ProductRow>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_many(&self, ids: &[Uuid]) -> RepoResult<Vec<ProductRow>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, product: NewProduct) -> RepoResult<ProductRow> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products
                (name, description, rich_description, image, brand, price, category_id,
                 count_in_stock, rating, num_reviews, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.name)
        .bind(product.description)
        .bind(product.rich_description)
        .bind(product.image)
        .bind(product.brand)
        .bind(product.price)
        .bind(product.category_id)
        .bind(product.count_in_stock)
        .bind(product.rating)
        .bind(product.num_reviews)
        .bind(product.is_featured)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> RepoResult<Option<ProductRow>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                rich_description = COALESCE($4, rich_description),
                image = COALESCE($5, image),
                brand = COALESCE($6, brand),
                price = COALESCE($7, price),
                category_id = COALESCE($8, category_id),
                count_in_stock = COALESCE($9, count_in_stock),
                rating = COALESCE($10, rating),
                num_reviews = COALESCE($11, num_reviews),
                is_featured = COALESCE($12, is_featured)
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.rich_description)
        .bind(patch.image)
        .bind(patch.brand)
        .bind(patch.price)
        .bind(patch.category_id)
        .bind(patch.count_in_stock)
        .bind(patch.rating)
        .bind(patch.num_reviews)
        .bind(patch.is_featured)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RepoResult<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(n)
    }

    async fn featured(&self, limit: i64) -> RepoResult<Vec<ProductRow>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE is_featured
            ORDER BY created_at DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
