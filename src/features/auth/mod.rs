//! Bearer-token authentication against an external OIDC provider.
//!
//! This service does not implement authentication itself: clients obtain
//! RS256 access tokens from the provider, and we validate them against
//! the provider's published JWKS.

mod jwks;
mod validator;

pub mod model;

pub use jwks::JwksClient;
pub use validator::JwtValidator;
