use jsonwebtoken::{EncodingKey, Header};
use tracing::error;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::access_jwt::ACCESS_TOKEN_ALG;
use crate::services::auth::claims::AccessTokenClaims;

/// Signs access tokens for the login endpoint with the same secret and algorithm
/// the gate verifies with.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn issue(&self, user_id: Uuid, is_admin: bool) -> Result<String, AppError> {
        self.issue_at(user_id, is_admin, chrono::Utc::now().timestamp())
    }

    pub fn issue_at(&self, user_id: Uuid, is_admin: bool, now: i64) -> Result<String, AppError> {
        let exp = now.checked_add(self.ttl_seconds).ok_or_else(|| {
            error!(now, ttl_seconds = self.ttl_seconds, "token expiry overflows");
            AppError::Internal
        })?;
        let claims = AccessTokenClaims {
            user_id: user_id.to_string(),
            is_admin,
            iat: now,
            exp,
        };

        let mut header = Header::new(ACCESS_TOKEN_ALG);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }
}
