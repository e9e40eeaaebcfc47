/// Factory: build the gate and the token issuer from application `Config`.
use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::services::auth::{AccessTokenVerifier, AuthGate, Exemptions, TokenIssuer};

pub fn build_auth_gate(config: &Config) -> Result<Arc<AuthGate>, ConfigError> {
    let exemptions =
        Exemptions::for_api(&config.api_prefix).map_err(|_| ConfigError::Invalid("API_URL"))?;
    let verifier = AccessTokenVerifier::new(&config.jwt_secret);

    Ok(Arc::new(AuthGate::new(exemptions, verifier)))
}

pub fn build_token_issuer(config: &Config) -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(&config.jwt_secret, config.jwt_ttl_seconds))
}
