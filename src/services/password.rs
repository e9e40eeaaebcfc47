/*
 * Responsibility
 * - Password hashing for stored credentials (Argon2, PHC string format)
 * - Verification used by the login handler
 * - Argon2 is CPU-bound: handlers go through the *_blocking / verify_credentials
 *   wrappers, which run on tokio's blocking pool
 */
use std::sync::LazyLock;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("salt generation failed: {0}")]
    Salt(String),
    #[error("hashing failed: {0}")]
    Hash(String),
    #[error("hashing task failed: {0}")]
    Task(String),
}

// Stands in for the stored hash when the account does not exist, so a miss
// costs the same Argon2 work as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("no-such-account").ok());

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Unparsable hashes never verify.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub async fn hash_password_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
}

/// Check a login attempt off the async workers.
///
/// `stored` is `None` for an unknown account: the password is then checked
/// against a dummy hash and the answer is always `false`.
pub async fn verify_credentials(stored: Option<String>, password: String) -> bool {
    let outcome = tokio::task::spawn_blocking(move || match stored {
        Some(hash) => verify_password(&hash, &password),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                verify_password(dummy, &password);
            }
            false
        }
    })
    .await;

    outcome.unwrap_or_else(|e| {
        tracing::error!(error = %e, "password verification task failed");
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "correct horse"));
        assert!(!verify_password(&hash, "battery staple"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_password("pw").unwrap(), hash_password("pw").unwrap());
    }

    #[test]
    fn garbage_hash_does_not_verify() {
        assert!(!verify_password("not-a-phc-string", "pw"));
    }

    #[tokio::test]
    async fn blocking_wrappers_round_trip() {
        let hash = hash_password_blocking("correct horse".to_string())
            .await
            .unwrap();
        assert!(verify_credentials(Some(hash.clone()), "correct horse".to_string()).await);
        assert!(!verify_credentials(Some(hash), "battery staple".to_string()).await);
    }

    #[tokio::test]
    async fn unknown_account_still_runs_argon2_and_fails() {
        assert!(!verify_credentials(None, "no-such-account".to_string()).await);

        // The dummy is a real Argon2 hash, so the miss path does full work.
        let dummy = DUMMY_HASH.as_deref().unwrap();
        assert!(dummy.starts_with("$argon2"));
        assert!(PasswordHash::new(dummy).is_ok());
    }
}
