use cookie::SameSite;

/// Seconds before actual expiry at which a token is treated as already
/// expired, so a token never expires mid-flight.
pub const TOKEN_REFRESH_MARGIN: i64 = 10;

/// Default cookie lifetime: 8 hours
pub const DEFAULT_COOKIE_LIFETIME: i64 = 60 * 60 * 8;

/// Attributes applied to the token cookies. Passed through unchanged,
/// never mutated by this crate.
#[derive(Debug, Clone)]
pub struct CookieOptions {
    /// Cookie name prefix; the pair is `{name}-access-token` /
    /// `{name}-refresh-token`
    pub name: String,
    /// Max-Age in seconds
    pub lifetime: i64,
    pub domain: Option<String>,
    pub path: String,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            name: "sb".to_string(),
            lifetime: DEFAULT_COOKIE_LIFETIME,
            domain: None,
            path: "/".to_string(),
            same_site: SameSite::Lax,
        }
    }
}

impl CookieOptions {
    pub fn access_token_name(&self) -> String {
        format!("{}-access-token", self.name)
    }

    pub fn refresh_token_name(&self) -> String {
        format!("{}-refresh-token", self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogoutOptions {
    /// Path to redirect to after logout; defaults to `/`
    pub return_to: Option<String>,
}

/// Options for the mounted auth routes
#[derive(Debug, Clone)]
pub struct AuthOptions {
    pub cookie_options: CookieOptions,
    pub token_refresh_margin: i64,
    pub logout: LogoutOptions,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            cookie_options: CookieOptions::default(),
            token_refresh_margin: TOKEN_REFRESH_MARGIN,
            logout: LogoutOptions::default(),
        }
    }
}

/// Per-call options for the user lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct GetUserOptions {
    /// Take the refresh path even if the access token is not yet expiring
    pub force_refresh: bool,
}
