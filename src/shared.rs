use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::provider::IdentityProvider;
use crate::session::AuthOptions;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn IdentityProvider + Send + Sync>,
    pub options: AuthOptions,
}

impl AppState {
    pub fn new(provider: Arc<dyn IdentityProvider + Send + Sync>, options: AuthOptions) -> Self {
        Self { provider, options }
    }
}

/// Crate-wide error type. The `Display` strings for the cookie/token
/// variants are load-bearing: clients match on them in the flat session
/// response shape, so they must not change.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("{0}")]
    Config(String),

    #[error("Cookie not found!")]
    MissingCookieHeader,

    #[error("No cookie found!")]
    MissingAccessToken,

    #[error("Not able to parse JWT payload!")]
    InvalidToken,

    #[error("No refresh_token cookie found!")]
    MissingRefreshToken,

    #[error("{0}")]
    Provider(String),

    #[error("Auth event missing!")]
    MissingAuthEvent,

    #[error("Auth session missing!")]
    MissingAuthSession,

    #[error("Unsupported auth event!")]
    UnsupportedAuthEvent,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::MissingCookieHeader
            | AuthError::MissingAccessToken
            | AuthError::InvalidToken
            | AuthError::MissingRefreshToken
            | AuthError::Provider(_) => StatusCode::UNAUTHORIZED,
            AuthError::MissingAuthEvent
            | AuthError::MissingAuthSession
            | AuthError::UnsupportedAuthEvent => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
