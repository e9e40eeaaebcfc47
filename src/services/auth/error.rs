use thiserror::Error;

/// Why a request failed authentication.
///
/// Every variant is a client error: the gate answers 401 and never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no token provided")]
    MissingToken,
    #[error("invalid token: malformed")]
    Malformed,
    #[error("invalid token: bad signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("invalid token: unsupported algorithm")]
    AlgorithmMismatch,
}

impl AuthError {
    /// Machine-readable kind, used as the `code` field of the 401 body.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::Malformed => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "token_expired",
            AuthError::AlgorithmMismatch => "algorithm_mismatch",
        }
    }
}
