/*
 * Responsibility
 * - categories CRUD
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[async_trait]
pub trait CategoryRepo: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<CategoryRow>>;
    async fn get(&self, id: Uuid) -> RepoResult<Option<CategoryRow>>;
    async fn create(
        &self,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> RepoResult<CategoryRow>;
    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> RepoResult<Option<CategoryRow>>;
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgCategoryRepo {
    pool: PgPool,
}

impl PgCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepo for PgCategoryRepo {
    async fn list(&self) -> RepoResult<Vec<CategoryRow>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, icon, color FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<CategoryRow>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, icon, color FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(
        &self,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> RepoResult<CategoryRow> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, icon, color)
            VALUES ($1, $2, $3)
            RETURNING id, name, icon, color
            "#,
        )
        .bind(name)
        .bind(icon)
        .bind(color)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> RepoResult<Option<CategoryRow>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET
                name = COALESCE($2, name),
                icon = COALESCE($3, icon),
                color = COALESCE($4, color)
            WHERE id = $1
            RETURNING id, name, icon, color
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(icon)
        .bind(color)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
