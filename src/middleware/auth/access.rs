//! Bearer gate for the REST API: exemption check → JWT verification → `AuthCtx` in extensions.
//!
//! Runs after the HTTP/CORS layers and before every API handler. A rejection is
//! final for the request: the handler never runs and the client gets a 401.

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthDecision, RequestContext};
use crate::state::AppState;

/// Put the gate in front of every route of `router`.
///
/// ```ignore
/// let api = Router::new().nest("/api", api::v1::routes());
/// let api = middleware::auth::access::apply(api, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8: from_fn cannot take State, so the state is passed explicitly.
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Nested routers see a stripped uri; exemption rules are written against the full path.
    let ctx = RequestContext {
        method: req.method(),
        path: original_uri.path(),
        headers: req.headers(),
    };

    match state.auth.authenticate(&ctx) {
        AuthDecision::Allow(None) => {}
        AuthDecision::Allow(Some(claims)) => {
            tracing::debug!(
                user_id = %claims.user_id,
                is_admin = claims.is_admin,
                issued_at = claims.issued_at,
                expires_at = claims.expires_at,
                "access token accepted"
            );
            // middleware → extractor
            req.extensions_mut().insert(AuthCtx::from(claims));
        }
        AuthDecision::Reject(err) => {
            tracing::warn!(
                error = %err,
                code = err.code(),
                method = %req.method(),
                path = original_uri.path(),
                "access token rejected"
            );
            return Err(AppError::Unauthorized(err));
        }
    }

    Ok(next.run(req).await)
}
