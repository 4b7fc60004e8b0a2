// Public API - what other modules can use
pub use options::{
    AuthOptions, CookieOptions, GetUserOptions, LogoutOptions, TOKEN_REFRESH_MARGIN,
};
pub use service::SessionService;
pub use types::{SessionResponse, TokenSave, VerifiedSession};

// Internal modules
pub mod cookies;
mod options;
mod service;
pub mod token;
mod types;
