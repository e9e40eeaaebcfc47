pub mod access_jwt;
pub mod claims;
pub mod error;
pub mod exemptions;
pub mod factory;
pub mod gate;
pub mod token_issuer;

pub use access_jwt::AccessTokenVerifier;
pub use claims::VerifiedAccessToken;
pub use error::AuthError;
pub use exemptions::Exemptions;
pub use factory::{build_auth_gate, build_token_issuer};
pub use gate::{AuthDecision, AuthGate, RequestContext};
pub use token_issuer::TokenIssuer;
