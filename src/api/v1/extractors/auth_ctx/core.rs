use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

use super::AuthCtx;

/// Extractor for handlers that need the caller's identity.
///
/// Relies on the gate having inserted `AuthCtx` into the extensions. On exempt
/// routes nothing is inserted, so this still answers 401 `missing_token`.
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .copied()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized(AuthError::MissingToken))
    }
}

/// Like `AuthCtxExtractor`, but the caller must also carry `isAdmin`.
/// Non-admins get 403.
pub struct AdminCtx(pub AuthCtx);

impl FromRequestParts<AppState> for AdminCtx {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthCtxExtractor(ctx) = AuthCtxExtractor::from_request_parts(parts, state).await?;
        if !ctx.is_admin {
            tracing::info!(user_id = %ctx.user_id, "admin route refused for non-admin");
            return Err(AppError::Forbidden);
        }
        Ok(AdminCtx(ctx))
    }
}
