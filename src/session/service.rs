use axum::http::HeaderMap;
use chrono::Utc;
use cookie::Cookie;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::cookies;
use super::options::{AuthOptions, GetUserOptions};
use super::token;
use super::types::{TokenSave, VerifiedSession};
use crate::provider::IdentityProvider;
use crate::shared::AuthError;

/// Service bridging a request's cookie jar and the identity provider
pub struct SessionService {
    provider: Arc<dyn IdentityProvider + Send + Sync>,
    options: AuthOptions,
}

impl SessionService {
    pub fn new(provider: Arc<dyn IdentityProvider + Send + Sync>, options: AuthOptions) -> Self {
        Self { provider, options }
    }

    /// Resolve the current user from the request's token cookies.
    ///
    /// Decodes the access token's `exp` (unverified) and either asks the
    /// provider for the user as-is, or, when the token is inside the
    /// refresh margin or `force_refresh` is set, exchanges the refresh
    /// token for a renewed pair. Does not write any cookies; pair with
    /// [`save_tokens`](Self::save_tokens) or use
    /// [`get_user_and_save_tokens`](Self::get_user_and_save_tokens).
    #[instrument(skip(self, headers))]
    pub async fn get_user(
        &self,
        headers: &HeaderMap,
        opts: GetUserOptions,
    ) -> Result<VerifiedSession, AuthError> {
        let cookie_options = &self.options.cookie_options;
        let jar = cookies::parse_cookie_header(headers)?;

        let access_token = jar
            .get(&cookie_options.access_token_name())
            .ok_or(AuthError::MissingAccessToken)?;

        let claims = token::decode_claims(access_token)?;
        let now = Utc::now().timestamp();

        if opts.force_refresh
            || token::is_expiring(claims.exp, now, self.options.token_refresh_margin)
        {
            debug!(
                exp = claims.exp,
                now,
                force_refresh = opts.force_refresh,
                "access token expiring, refreshing against the provider"
            );

            let refresh_token = jar
                .get(&cookie_options.refresh_token_name())
                .ok_or(AuthError::MissingRefreshToken)?;

            let refreshed = self.provider.refresh_access_token(refresh_token).await?;
            info!(user_id = %refreshed.user.id, "access token refreshed");

            Ok(VerifiedSession {
                user: refreshed.user,
                access_token: refreshed.access_token,
                refresh_token: Some(refreshed.refresh_token),
            })
        } else {
            let user = self.provider.get_user(access_token).await?;
            debug!(user_id = %user.id, "access token still valid");

            Ok(VerifiedSession {
                user,
                access_token: access_token.clone(),
                refresh_token: None,
            })
        }
    }

    /// Decide whether the renewed tokens in `session` need persisting and
    /// build the `Set-Cookie` values if so.
    ///
    /// The expiry decision is re-derived from the request's *current*
    /// access-token cookie, not from the passed-in session: a freshness
    /// guard against a stale caller-supplied result. Token *values* come
    /// from the session; if it carries no refresh token (the non-refresh
    /// path raced past the margin between the two checks), the request's
    /// existing refresh cookie is reused.
    #[instrument(skip(self, headers, session))]
    pub fn save_tokens(
        &self,
        headers: &HeaderMap,
        session: &VerifiedSession,
        opts: GetUserOptions,
    ) -> Result<TokenSave, AuthError> {
        let cookie_options = &self.options.cookie_options;
        let jar = cookies::parse_cookie_header(headers)?;

        let current_token = jar
            .get(&cookie_options.access_token_name())
            .ok_or(AuthError::MissingAccessToken)?;

        let claims = token::decode_claims(current_token)?;
        let now = Utc::now().timestamp();

        if !opts.force_refresh
            && !token::is_expiring(claims.exp, now, self.options.token_refresh_margin)
        {
            return Ok(TokenSave::NotNeeded);
        }

        let refresh_token = match &session.refresh_token {
            Some(refreshed) => refreshed.clone(),
            None => jar
                .get(&cookie_options.refresh_token_name())
                .cloned()
                .ok_or(AuthError::MissingRefreshToken)?,
        };

        let set = cookies::token_cookies(cookie_options, &session.access_token, &refresh_token);
        info!("persisting renewed token cookies");
        Ok(TokenSave::Saved(set))
    }

    /// [`get_user`](Self::get_user) followed by a save pass. Returns the
    /// user lookup result unchanged; a failed save only costs the cookies
    /// (logged at warn), never the session.
    pub async fn get_user_and_save_tokens(
        &self,
        headers: &HeaderMap,
        opts: GetUserOptions,
    ) -> (Result<VerifiedSession, AuthError>, Vec<Cookie<'static>>) {
        let session = self.get_user(headers, opts).await;

        let cookies_to_set = match &session {
            Ok(verified) => match self.save_tokens(headers, verified, opts) {
                Ok(TokenSave::Saved(set)) => set,
                Ok(TokenSave::NotNeeded) => Vec::new(),
                Err(error) => {
                    warn!(%error, "token save failed");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        (session, cookies_to_set)
    }
}
