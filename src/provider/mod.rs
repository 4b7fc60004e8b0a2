// Public API - what other modules can use
pub use gotrue::GoTrueClient;
pub use types::{IdentityProvider, RefreshedSession, User};

// Internal modules
mod gotrue;
mod types;
