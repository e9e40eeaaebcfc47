/*
 * Responsibility
 * - Users request/response DTOs
 * - validate() does shape checks only; uniqueness is the repo's job
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::user_repo::UserRow;

const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 64;

fn validate_credentials(name: &str, email: &str, password: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name is required");
    }
    let email = email.trim();
    if email.is_empty() || !email.contains('@') || email.starts_with('@') || email.ends_with('@')
    {
        return Err("email is invalid");
    }
    let len = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return Err("password must be 6 to 64 characters");
    }
    Ok(())
}

/// Body of `POST /users/register` and `POST /users`.
///
/// `is_admin` is only honoured on the admin-only `POST /users`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    pub street: Option<String>,
    pub apartment: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_credentials(&self.name, &self.email, &self.password)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("email and password are required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: String,
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub street: Option<String>,
    pub apartment: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            is_admin: row.is_admin,
            street: row.street,
            apartment: row.apartment,
            zip: row.zip,
            city: row.city,
            country: row.country,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub count: i64,
}
