use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::shared::AuthError;

/// Payload of the provider-issued access token. Only `exp` is consulted;
/// the rest is carried for logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Decode the access token's payload without verifying the signature.
/// The token is provider-signed with a key this crate never holds; the
/// payload is trusted only for the expiry arithmetic, never for identity
/// (identity always comes back from the provider itself).
pub fn decode_claims(access_token: &str) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;

    decode::<TokenClaims>(access_token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "failed to decode JWT payload");
            AuthError::InvalidToken
        })
}

/// Whether a token with the given `exp` should be treated as expired,
/// `margin` seconds early
pub fn is_expiring(exp: i64, now: i64, margin: i64) -> bool {
    exp < now + margin
}
