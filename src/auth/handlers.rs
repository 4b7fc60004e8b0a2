use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::session::{cookies, GetUserOptions, SessionResponse, SessionService};
use crate::shared::{AppState, AuthError};

const CALLBACK_BODY_LIMIT: usize = 64 * 1024;

/// Dispatcher for the mounted auth routes. Inspects the wildcard segment
/// and forwards to the matching handler; anything else is a 404.
#[instrument(skip(state, req))]
pub async fn handle_auth(
    State(state): State<AppState>,
    Path(route): Path<String>,
    req: Request<Body>,
) -> Response {
    match route.as_str() {
        "callback" => handle_callback(state, req).await,
        "user" => handle_user(state, req).await,
        "logout" => handle_logout(state, req).await,
        _ => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// GET/POST {base}/user - resolve the current user, transparently
/// refreshing and persisting tokens. Always responds 200 with the flat
/// session shape; failure lives in its `error` field.
async fn handle_user(state: AppState, req: Request<Body>) -> Response {
    let service = SessionService::new(Arc::clone(&state.provider), state.options.clone());

    let (session, cookies_to_set) = service
        .get_user_and_save_tokens(req.headers(), GetUserOptions::default())
        .await;

    let mut response = Json(SessionResponse::from(session)).into_response();
    cookies::apply_set_cookie(response.headers_mut(), &cookies_to_set);
    response
}

#[derive(Debug, Deserialize)]
struct LogoutQuery {
    #[serde(rename = "returnTo")]
    return_to: Option<String>,
}

/// Normalize a post-logout path: leading slash enforced, and anything
/// that could leave the origin falls back to `/`. The value is
/// request-controlled, so control characters (header splitting) and
/// protocol-relative `//host` or `/\host` forms are rejected outright.
fn normalize_return_to(raw: &str) -> String {
    if raw.chars().any(|c| c.is_ascii_control()) {
        return "/".to_string();
    }

    let path = if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    };

    if path.starts_with("//") || path.starts_with("/\\") {
        return "/".to_string();
    }
    path
}

/// GET/POST {base}/logout - revoke the session at the provider, expire
/// the local token cookies, redirect to `returnTo`.
async fn handle_logout(state: AppState, req: Request<Body>) -> Response {
    let return_to = Query::<LogoutQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|query| query.0.return_to)
        .or_else(|| state.options.logout.return_to.clone())
        .unwrap_or_else(|| "/".to_string());
    let return_to = normalize_return_to(&return_to);

    if let Ok(jar) = cookies::parse_cookie_header(req.headers()) {
        if let Some(access_token) = jar.get(&state.options.cookie_options.access_token_name()) {
            // Revocation failure must not block the local logout
            match state.provider.sign_out(access_token).await {
                Ok(()) => info!("provider session revoked"),
                Err(error) => warn!(%error, "provider sign-out failed"),
            }
        }
    }

    let expired = cookies::expired_token_cookies(&state.options.cookie_options);
    let mut response = Redirect::to(&return_to).into_response();
    cookies::apply_set_cookie(response.headers_mut(), &expired);
    response
}

#[derive(Debug, Deserialize)]
struct CallbackPayload {
    event: Option<String>,
    session: Option<CallbackSession>,
}

#[derive(Debug, Deserialize)]
struct CallbackSession {
    access_token: String,
    refresh_token: String,
}

/// POST {base}/callback - the client reports an auth state change and the
/// new token pair; persist or expire the token cookies accordingly.
async fn handle_callback(state: AppState, req: Request<Body>) -> Response {
    let bytes = match axum::body::to_bytes(req.into_body(), CALLBACK_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(_) => return AuthError::MissingAuthEvent.into_response(),
    };

    let payload: CallbackPayload = match serde_json::from_slice(&bytes) {
        Ok(payload) => payload,
        Err(_) => return AuthError::MissingAuthEvent.into_response(),
    };

    let event = match payload.event {
        Some(event) if !event.is_empty() => event,
        _ => return AuthError::MissingAuthEvent.into_response(),
    };

    let cookie_options = &state.options.cookie_options;
    let cookies_to_set = match event.as_str() {
        "SIGNED_IN" | "TOKEN_REFRESHED" => match payload.session {
            Some(session) => {
                info!(%event, "persisting token cookies from auth event");
                cookies::token_cookies(
                    cookie_options,
                    &session.access_token,
                    &session.refresh_token,
                )
            }
            None => return AuthError::MissingAuthSession.into_response(),
        },
        "SIGNED_OUT" | "USER_DELETED" => {
            info!(%event, "expiring token cookies from auth event");
            cookies::expired_token_cookies(cookie_options)
        }
        _ => return AuthError::UnsupportedAuthEvent.into_response(),
    };

    let mut response = Json(serde_json::json!({})).into_response();
    cookies::apply_set_cookie(response.headers_mut(), &cookies_to_set);
    response
}
