// Public API - what other modules can use
pub use routes::routes;

// Internal modules
mod handlers;
mod routes;
