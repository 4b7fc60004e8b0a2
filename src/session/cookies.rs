use axum::http::{header, HeaderMap, HeaderValue};
use cookie::time::Duration;
use cookie::Cookie;
use std::collections::HashMap;

use super::options::CookieOptions;
use crate::shared::AuthError;

/// Parse the request `Cookie` header into a name -> value map.
/// A missing or non-UTF-8 header is the caller's "Cookie not found!" case.
pub fn parse_cookie_header(headers: &HeaderMap) -> Result<HashMap<String, String>, AuthError> {
    let raw = headers
        .get(header::COOKIE)
        .ok_or(AuthError::MissingCookieHeader)?
        .to_str()
        .map_err(|_| AuthError::MissingCookieHeader)?;

    let mut cookies = HashMap::new();
    for part in raw.split(';') {
        if let Ok(parsed) = Cookie::parse(part.trim()) {
            cookies.insert(parsed.name().to_string(), parsed.value().to_string());
        }
    }

    Ok(cookies)
}

fn build_token_cookie(
    options: &CookieOptions,
    key: &str,
    value: String,
    max_age: i64,
) -> Cookie<'static> {
    let mut cookie = Cookie::new(format!("{}-{}", options.name, key), value);
    cookie.set_path(options.path.clone());
    cookie.set_max_age(Duration::seconds(max_age));
    cookie.set_same_site(options.same_site);
    if let Some(domain) = &options.domain {
        cookie.set_domain(domain.clone());
    }
    cookie
}

/// `Set-Cookie` values persisting a renewed token pair
pub fn token_cookies(
    options: &CookieOptions,
    access_token: &str,
    refresh_token: &str,
) -> Vec<Cookie<'static>> {
    vec![
        build_token_cookie(options, "access-token", access_token.to_string(), options.lifetime),
        build_token_cookie(
            options,
            "refresh-token",
            refresh_token.to_string(),
            options.lifetime,
        ),
    ]
}

/// `Set-Cookie` values expiring the token pair (Max-Age 0, empty value)
pub fn expired_token_cookies(options: &CookieOptions) -> Vec<Cookie<'static>> {
    vec![
        build_token_cookie(options, "access-token", String::new(), 0),
        build_token_cookie(options, "refresh-token", String::new(), 0),
    ]
}

/// Append the cookies to a response header map as `Set-Cookie` entries
pub fn apply_set_cookie(headers: &mut HeaderMap, cookies: &[Cookie<'static>]) {
    for cookie in cookies {
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            headers.append(header::SET_COOKIE, value);
        }
    }
}
