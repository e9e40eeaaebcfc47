/*
 * Responsibility
 * - users table access through SQLx
 * - UserRepo trait so handlers depend on `Arc<dyn UserRepo>`, not on PgPool
 * - DB errors come back as RepoError (unique email -> Conflict)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub street: Option<String>,
    pub apartment: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub street: Option<String>,
    pub apartment: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<UserRow>>;
    async fn get(&self, id: Uuid) -> RepoResult<Option<UserRow>>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>>;
    async fn create(&self, user: NewUser) -> RepoResult<UserRow>;
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
    async fn count(&self) -> RepoResult<i64>;
}

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, phone, is_admin,
    street, apartment, zip, city, country, created_at
"#;

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, user: NewUser) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users
                (name, email, password_hash, phone, is_admin, street, apartment, zip, city, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.phone)
        .bind(user.is_admin)
        .bind(user.street)
        .bind(user.apartment)
        .bind(user.zip)
        .bind(user.city)
        .bind(user.country)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RepoResult<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(n)
    }
}
