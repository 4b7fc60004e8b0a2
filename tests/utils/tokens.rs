use jsonwebtoken::{encode, EncodingKey, Header};

/// Mint an access token with the given `exp`. The signature key is
/// irrelevant: the crate reads the payload without verification.
pub fn mint_access_token(exp: i64) -> String {
    encode(
        &Header::default(),
        &serde_json::json!({ "exp": exp, "sub": "user-123" }),
        &EncodingKey::from_secret(b"not-the-real-provider-key"),
    )
    .unwrap()
}

/// Build a `Cookie` header value carrying the token pair under the
/// default `sb` prefix
pub fn cookie_header(access_token: &str, refresh_token: Option<&str>) -> String {
    match refresh_token {
        Some(refresh) => format!(
            "sb-access-token={access_token}; sb-refresh-token={refresh}"
        ),
        None => format!("sb-access-token={access_token}"),
    }
}
