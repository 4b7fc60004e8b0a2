// Library crate for the cookie-backed auth helpers
// This file exposes the public API for integration tests

pub mod auth;
pub mod provider;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use provider::{GoTrueClient, IdentityProvider, RefreshedSession, User};
pub use session::{
    AuthOptions, CookieOptions, GetUserOptions, LogoutOptions, SessionResponse, SessionService,
    TokenSave, VerifiedSession, TOKEN_REFRESH_MARGIN,
};
pub use shared::{AppState, AuthError};
