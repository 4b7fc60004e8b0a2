use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::types::{IdentityProvider, RefreshedSession, User};
use crate::shared::AuthError;

/// REST client for a GoTrue-compatible identity API
#[derive(Clone)]
pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// GoTrue error bodies are not uniform across endpoints; take whichever
/// message field is present.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
}

impl ProviderErrorBody {
    fn into_message(self, status: StatusCode) -> String {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .unwrap_or_else(|| format!("identity provider returned {status}"))
    }
}

impl GoTrueClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, AuthError> {
        let base_url = base_url.into();
        let anon_key = anon_key.into();
        if base_url.is_empty() || anon_key.is_empty() {
            return Err(AuthError::Config(
                "supabaseUrl and supabaseAnonKey env variables are required!".to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    /// Build a client from `SUPABASE_URL` / `SUPABASE_ANON_KEY`
    pub fn from_env() -> Result<Self, AuthError> {
        let base_url = std::env::var("SUPABASE_URL").unwrap_or_default();
        let anon_key = std::env::var("SUPABASE_ANON_KEY").unwrap_or_default();
        Self::new(base_url, anon_key)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AuthError> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| AuthError::Provider(e.to_string()))
        } else {
            let body = response
                .json::<ProviderErrorBody>()
                .await
                .unwrap_or(ProviderErrorBody {
                    msg: None,
                    message: None,
                    error_description: None,
                });
            let message = body.into_message(status);
            debug!(%status, %message, "identity provider rejected the request");
            Err(AuthError::Provider(message))
        }
    }
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    #[instrument(skip(self, access_token))]
    async fn get_user(&self, access_token: &str) -> Result<User, AuthError> {
        let response = self
            .http
            .get(self.endpoint("/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        self.parse_response(response).await
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshedSession, AuthError> {
        let response = self
            .http
            .post(self.endpoint("/token?grant_type=refresh_token"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        self.parse_response(response).await
    }

    #[instrument(skip(self, access_token))]
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("/logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response
                .json::<ProviderErrorBody>()
                .await
                .unwrap_or(ProviderErrorBody {
                    msg: None,
                    message: None,
                    error_description: None,
                });
            Err(AuthError::Provider(body.into_message(status)))
        }
    }
}
