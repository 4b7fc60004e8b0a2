use axum::{routing::any, Router};

use super::handlers::handle_auth;
use crate::shared::AppState;

/// Auth sub-router. Nest it under the base path, e.g.
/// `Router::new().nest("/api/auth", auth::routes())`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/*route", any(handle_auth))
}
