use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The user a validated access token belongs to, injected into request
/// extensions by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Subject claim: the provider's stable user id
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
