pub mod mocks;
pub mod tokens;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use mocks::{ProviderCall, RecordingProvider};
#[allow(unused_imports)]
pub use tokens::{cookie_header, mint_access_token};
