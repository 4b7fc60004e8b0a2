use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use authrelay::{AuthError, IdentityProvider, RefreshedSession, User};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// One recorded call against the recording provider
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    GetUser(String),
    Refresh(String),
    SignOut(String),
}

/// Identity provider double that records every call and serves canned
/// responses
#[derive(Clone)]
pub struct RecordingProvider {
    user: User,
    refresh_error: Option<String>,
    calls: Arc<RwLock<Vec<ProviderCall>>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self {
            user: User {
                id: "user-123".to_string(),
                email: Some("user@example.com".to_string()),
                role: Some("authenticated".to_string()),
                user_metadata: serde_json::Value::Null,
            },
            refresh_error: None,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_refresh_error(mut self, message: &str) -> Self {
        self.refresh_error = Some(message.to_string());
        self
    }

    pub async fn calls(&self) -> Vec<ProviderCall> {
        self.calls.read().await.clone()
    }

    pub async fn refresh_calls(&self) -> usize {
        self.calls()
            .await
            .iter()
            .filter(|call| matches!(call, ProviderCall::Refresh(_)))
            .count()
    }

    async fn record(&self, call: ProviderCall) {
        self.calls.write().await.push(call);
    }
}

impl Default for RecordingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for RecordingProvider {
    async fn get_user(&self, access_token: &str) -> Result<User, AuthError> {
        self.record(ProviderCall::GetUser(access_token.to_string()))
            .await;
        Ok(self.user.clone())
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshedSession, AuthError> {
        self.record(ProviderCall::Refresh(refresh_token.to_string()))
            .await;
        match &self.refresh_error {
            Some(message) => Err(AuthError::Provider(message.clone())),
            None => Ok(RefreshedSession {
                access_token: "refreshed-access".to_string(),
                refresh_token: "refreshed-refresh".to_string(),
                user: self.user.clone(),
            }),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.record(ProviderCall::SignOut(access_token.to_string()))
            .await;
        Ok(())
    }
}
