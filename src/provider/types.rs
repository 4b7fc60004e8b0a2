use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::AuthError;

/// Provider-issued user record. Opaque to this crate beyond serde
/// round-tripping; extra claims land in `user_metadata`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub user_metadata: serde_json::Value,
}

/// Token pair returned by the provider's refresh endpoint
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RefreshedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// The vendor seam. Everything this crate asks of the identity provider
/// goes through here, so tests can swap in a recording mock.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch the user the access token belongs to
    async fn get_user(&self, access_token: &str) -> Result<User, AuthError>;

    /// Exchange a refresh token for a renewed token pair
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshedSession, AuthError>;

    /// Revoke the session behind the access token
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
