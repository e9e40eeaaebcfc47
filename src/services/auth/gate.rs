//! Per-request authentication decision.
//!
//! This is the framework-free core of the gate: it sees a method, a path and the
//! headers, and answers Allow/Reject. The axum wiring lives in
//! `middleware::auth::access`.

use axum::http::{HeaderMap, Method};

use crate::services::auth::access_jwt::{AccessTokenVerifier, bearer_token};
use crate::services::auth::claims::VerifiedAccessToken;
use crate::services::auth::error::AuthError;
use crate::services::auth::exemptions::Exemptions;

/// What the gate looks at. `path` carries no query string.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub headers: &'a HeaderMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// `None` for exempt routes, `Some` once a token has been verified.
    Allow(Option<VerifiedAccessToken>),
    Reject(AuthError),
}

/// Immutable gate configuration, built once at startup and shared via `Arc`.
#[derive(Debug, Clone)]
pub struct AuthGate {
    exemptions: Exemptions,
    verifier: AccessTokenVerifier,
}

impl AuthGate {
    pub fn new(exemptions: Exemptions, verifier: AccessTokenVerifier) -> Self {
        Self {
            exemptions,
            verifier,
        }
    }

    pub fn authenticate(&self, ctx: &RequestContext<'_>) -> AuthDecision {
        self.authenticate_at(ctx, chrono::Utc::now().timestamp())
    }

    pub fn authenticate_at(&self, ctx: &RequestContext<'_>, now: i64) -> AuthDecision {
        // Exempt requests never look at the Authorization header.
        if self.exemptions.is_exempt(ctx.method, ctx.path) {
            return AuthDecision::Allow(None);
        }

        let verified = bearer_token(ctx.headers).and_then(|token| self.verifier.verify_at(token, now));

        match verified {
            Ok(claims) => AuthDecision::Allow(Some(claims)),
            Err(err) => AuthDecision::Reject(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, header};
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    const SECRET: &str = "gate-secret";
    const NOW: i64 = 1_700_000_000;

    fn gate() -> AuthGate {
        AuthGate::new(
            Exemptions::for_api("/api").unwrap(),
            AccessTokenVerifier::new(SECRET),
        )
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    fn token(user_id: Uuid, is_admin: bool, exp: i64) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &json!({ "userID": user_id.to_string(), "isAdmin": is_admin, "iat": NOW, "exp": exp }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn exempt_route_allows_without_reading_the_header() {
        // A garbage header would be rejected if it were inspected.
        let headers = bearer("garbage");
        let decision = gate().authenticate_at(
            &RequestContext {
                method: &Method::GET,
                path: "/api/products/123",
                headers: &headers,
            },
            NOW,
        );
        assert_eq!(decision, AuthDecision::Allow(None));
    }

    #[test]
    fn protected_route_without_header_is_missing_token() {
        let headers = HeaderMap::new();
        let decision = gate().authenticate_at(
            &RequestContext {
                method: &Method::POST,
                path: "/api/products",
                headers: &headers,
            },
            NOW,
        );
        assert_eq!(decision, AuthDecision::Reject(AuthError::MissingToken));
    }

    #[test]
    fn valid_token_attaches_claims() {
        let user_id = Uuid::new_v4();
        let headers = bearer(&token(user_id, false, NOW + 60));
        let decision = gate().authenticate_at(
            &RequestContext {
                method: &Method::GET,
                path: "/api/users/perfil",
                headers: &headers,
            },
            NOW,
        );

        let AuthDecision::Allow(Some(claims)) = decision else {
            panic!("expected claims, got {decision:?}");
        };
        assert_eq!(claims.user_id, user_id);
        assert!(!claims.is_admin);
    }

    #[test]
    fn expired_token_is_rejected() {
        let headers = bearer(&token(Uuid::new_v4(), true, NOW - 1));
        let decision = gate().authenticate_at(
            &RequestContext {
                method: &Method::GET,
                path: "/api/orders",
                headers: &headers,
            },
            NOW,
        );
        assert_eq!(decision, AuthDecision::Reject(AuthError::Expired));
    }
}
