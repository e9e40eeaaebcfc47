use axum::http::{HeaderMap, header};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::auth::claims::{AccessTokenClaims, VerifiedAccessToken};
use crate::services::auth::error::AuthError;

/// The only accepted signing scheme. There is no negotiation with the token header.
pub const ACCESS_TOKEN_ALG: Algorithm = Algorithm::HS256;

const ACCESS_TOKEN_ALG_NAME: &str = "HS256";

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// Absent header, non-UTF-8 value, another scheme or an empty token all count as
/// "no token supplied".
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    // Scheme names are case-insensitive (RFC 7235).
    let (scheme, token) = value.trim_start().split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::MissingToken);
    }
    let token = token.trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

// Read `alg` straight from the first segment. jsonwebtoken cannot even parse a
// header carrying `none`, which would otherwise surface as a generic decode error.
fn header_alg(token: &str) -> Result<String, AuthError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header.trim_end_matches('='))
        .map_err(|_| AuthError::Malformed)?;
    let raw: RawHeader = serde_json::from_slice(&bytes).map_err(|_| AuthError::Malformed)?;
    Ok(raw.alg)
}

fn map_jwt_error(err: &jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidAlgorithm => AuthError::AlgorithmMismatch,
        _ => AuthError::Malformed,
    }
}

/// HS256 access-token verifier.
///
/// - Key material stays out of Debug output.
#[derive(Clone)]
pub struct AccessTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenVerifier")
            .field("alg", &ACCESS_TOKEN_ALG)
            .finish_non_exhaustive()
    }
}

impl AccessTokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(ACCESS_TOKEN_ALG);
        validation.algorithms = vec![ACCESS_TOKEN_ALG];
        // `exp` is compared by hand in `verify_at` (expired when now >= exp, no leeway).
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify against the current wall clock.
    pub fn verify(&self, token: &str) -> Result<VerifiedAccessToken, AuthError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Verify with an explicit `now` (unix seconds).
    ///
    /// Order of checks: shape + algorithm, signature + claim shape, expiry, subject.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<VerifiedAccessToken, AuthError> {
        if header_alg(token)? != ACCESS_TOKEN_ALG_NAME {
            return Err(AuthError::AlgorithmMismatch);
        }

        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| map_jwt_error(&e))?;
        let claims = data.claims;

        if now >= claims.exp {
            return Err(AuthError::Expired);
        }

        let user_id = parse_subject(&claims.user_id)?;

        Ok(VerifiedAccessToken {
            user_id,
            is_admin: claims.is_admin,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

// Project convention: the subject is a UUID.
fn parse_subject(raw: &str) -> Result<Uuid, AuthError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AuthError::Malformed);
    }
    Uuid::parse_str(raw).map_err(|_| AuthError::Malformed)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "test-secret";
    const NOW: i64 = 1_700_000_000;

    fn sign_with(alg: Algorithm, secret: &str, claims: &serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(user_id: Uuid, is_admin: bool, exp: i64) -> serde_json::Value {
        json!({ "userID": user_id.to_string(), "isAdmin": is_admin, "iat": NOW - 60, "exp": exp })
    }

    #[test]
    fn round_trips_claims_signed_with_the_same_secret() {
        let user_id = Uuid::new_v4();
        let token = sign_with(Algorithm::HS256, SECRET, &claims(user_id, true, NOW + 3600));

        let verified = AccessTokenVerifier::new(SECRET)
            .verify_at(&token, NOW)
            .unwrap();

        assert_eq!(
            verified,
            VerifiedAccessToken {
                user_id,
                is_admin: true,
                issued_at: NOW - 60,
                expires_at: NOW + 3600,
            }
        );
    }

    #[test]
    fn other_secret_is_an_invalid_signature() {
        let token = sign_with(
            Algorithm::HS256,
            "another-secret",
            &claims(Uuid::new_v4(), false, NOW + 3600),
        );
        let err = AccessTokenVerifier::new(SECRET)
            .verify_at(&token, NOW)
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidSignature);
    }

    #[test]
    fn flipped_signature_byte_is_an_invalid_signature() {
        let token = sign_with(
            Algorithm::HS256,
            SECRET,
            &claims(Uuid::new_v4(), false, NOW + 3600),
        );
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        let i = sig_start + 4;
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let err = AccessTokenVerifier::new(SECRET)
            .verify_at(&tampered, NOW)
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidSignature);
    }

    #[test]
    fn past_or_present_expiry_is_expired_even_with_a_valid_signature() {
        let verifier = AccessTokenVerifier::new(SECRET);
        let user_id = Uuid::new_v4();

        let past = sign_with(Algorithm::HS256, SECRET, &claims(user_id, false, NOW - 1));
        assert_eq!(verifier.verify_at(&past, NOW).unwrap_err(), AuthError::Expired);

        let now = sign_with(Algorithm::HS256, SECRET, &claims(user_id, false, NOW));
        assert_eq!(verifier.verify_at(&now, NOW).unwrap_err(), AuthError::Expired);

        let next = sign_with(Algorithm::HS256, SECRET, &claims(user_id, false, NOW + 1));
        assert!(verifier.verify_at(&next, NOW).is_ok());
    }

    #[test]
    fn other_algorithms_are_rejected() {
        let token = sign_with(
            Algorithm::HS512,
            SECRET,
            &claims(Uuid::new_v4(), true, NOW + 3600),
        );
        let err = AccessTokenVerifier::new(SECRET)
            .verify_at(&token, NOW)
            .unwrap_err();
        assert_eq!(err, AuthError::AlgorithmMismatch);
    }

    #[test]
    fn none_algorithm_is_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            claims(Uuid::new_v4(), true, NOW + 3600)
                .to_string()
                .as_bytes(),
        );
        let token = format!("{header}.{payload}.");

        let err = AccessTokenVerifier::new(SECRET)
            .verify_at(&token, NOW)
            .unwrap_err();
        assert_eq!(err, AuthError::AlgorithmMismatch);
    }

    #[test]
    fn garbage_and_wrong_claim_shapes_are_malformed() {
        let verifier = AccessTokenVerifier::new(SECRET);

        assert_eq!(verifier.verify_at("not-a-jwt", NOW).unwrap_err(), AuthError::Malformed);
        assert_eq!(verifier.verify_at("a.b.c.d", NOW).unwrap_err(), AuthError::Malformed);
        assert_eq!(verifier.verify_at("!!.e30.x", NOW).unwrap_err(), AuthError::Malformed);

        let missing_admin = sign_with(
            Algorithm::HS256,
            SECRET,
            &json!({ "userID": Uuid::new_v4().to_string(), "iat": NOW, "exp": NOW + 60 }),
        );
        assert_eq!(
            verifier.verify_at(&missing_admin, NOW).unwrap_err(),
            AuthError::Malformed
        );

        let not_a_uuid = sign_with(
            Algorithm::HS256,
            SECRET,
            &json!({ "userID": "alice", "isAdmin": false, "iat": NOW, "exp": NOW + 60 }),
        );
        assert_eq!(
            verifier.verify_at(&not_a_uuid, NOW).unwrap_err(),
            AuthError::Malformed
        );
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers).unwrap_err(), AuthError::MissingToken);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers).unwrap_err(), AuthError::MissingToken);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers).unwrap_err(), AuthError::MissingToken);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer a.b.c"));
        assert_eq!(bearer_token(&headers).unwrap(), "a.b.c");
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        for value in ["bearer a.b.c", "BEARER a.b.c", "bEaReR  a.b.c "] {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
            assert_eq!(bearer_token(&headers).unwrap(), "a.b.c", "{value}");
        }

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer"));
        assert_eq!(bearer_token(&headers).unwrap_err(), AuthError::MissingToken);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearerx a.b.c"));
        assert_eq!(bearer_token(&headers).unwrap_err(), AuthError::MissingToken);
    }
}
