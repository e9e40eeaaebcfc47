use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token (JWT) payload, as it travels on the wire.
///
/// Field names follow the public contract (`userID`, `isAdmin`) so tokens issued
/// by other clients of the same secret stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Verified, application-facing view of the claims.
///
/// `user_id` is promoted to `Uuid`; anything else is rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub user_id: Uuid,
    pub is_admin: bool,
    pub issued_at: i64,
    pub expires_at: i64,
}
