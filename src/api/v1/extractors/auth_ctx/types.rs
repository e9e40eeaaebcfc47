/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The gate verifies the token and stores it in request extensions; handlers only take this type
 *
 * Notes
 * - JWT verification lives in services::auth; this is the contract, nothing more
 * - Serialized as `{ "userID", "isAdmin" }`, the same names the token carries
 */
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::VerifiedAccessToken;

/// Identity attached to an authenticated request.
///
/// `is_admin` is a coarse capability flag; finer checks (ownership) are done by
/// the handler that knows the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

impl AuthCtx {
    pub fn new(user_id: Uuid, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// Owners can read their own records, admins can read anyone's.
    pub fn ensure_self_or_admin(&self, owner: Uuid) -> Result<(), AppError> {
        if self.is_admin || self.user_id == owner {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(token: VerifiedAccessToken) -> Self {
        Self::new(token.user_id, token.is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_token_field_names() {
        let id = Uuid::nil();
        let json = serde_json::to_value(AuthCtx::new(id, true)).unwrap();
        assert_eq!(json["userID"], id.to_string());
        assert_eq!(json["isAdmin"], true);
    }

    #[test]
    fn ownership_check() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(AuthCtx::new(me, false).ensure_self_or_admin(me).is_ok());
        assert!(matches!(
            AuthCtx::new(me, false).ensure_self_or_admin(other),
            Err(AppError::Forbidden)
        ));
        assert!(AuthCtx::new(me, true).ensure_self_or_admin(other).is_ok());
    }
}
