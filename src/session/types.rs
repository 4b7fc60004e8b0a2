use cookie::Cookie;
use serde::{Deserialize, Serialize};

use crate::provider::User;
use crate::shared::AuthError;

/// A session the identity provider has vouched for this request
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedSession {
    pub user: User,
    pub access_token: String,
    /// Present only when the refresh path ran
    pub refresh_token: Option<String>,
}

/// Outcome of a token-save pass
#[derive(Debug, Clone, PartialEq)]
pub enum TokenSave {
    /// Renewed cookies to append to the response
    Saved(Vec<Cookie<'static>>),
    /// The request's token is still comfortably valid
    NotNeeded,
}

/// The flat wire shape callers consume. Failure is signalled only through
/// the `error` field; `user` and `accessToken` are always present (null on
/// failure).
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<User>,
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<VerifiedSession, AuthError>> for SessionResponse {
    fn from(result: Result<VerifiedSession, AuthError>) -> Self {
        match result {
            Ok(session) => Self {
                user: Some(session.user),
                access_token: Some(session.access_token),
                refresh_token: session.refresh_token,
                error: None,
            },
            Err(error) => Self {
                user: None,
                access_token: None,
                refresh_token: None,
                error: Some(error.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "user-123".to_string(),
            email: Some("user@example.com".to_string()),
            role: None,
            user_metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_success_shape_uses_camel_case() {
        let response = SessionResponse::from(Ok(VerifiedSession {
            user: test_user(),
            access_token: "abc".to_string(),
            refresh_token: Some("r123".to_string()),
        }));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["accessToken"], "abc");
        assert_eq!(json["refreshToken"], "r123");
        assert_eq!(json["user"]["id"], "user-123");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_collapses_to_null_user_and_message() {
        let response = SessionResponse::from(Err(AuthError::MissingCookieHeader));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["user"], serde_json::Value::Null);
        assert_eq!(json["accessToken"], serde_json::Value::Null);
        assert_eq!(json["error"], "Cookie not found!");
        assert!(json.get("refreshToken").is_none());
    }

    #[test]
    fn test_non_refresh_path_omits_refresh_token() {
        let response = SessionResponse::from(Ok(VerifiedSession {
            user: test_user(),
            access_token: "abc".to_string(),
            refresh_token: None,
        }));

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("refreshToken").is_none());
    }
}
