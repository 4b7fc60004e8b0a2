mod auth;
mod provider;
mod session;
mod shared;

use axum::Router;
use provider::GoTrueClient;
use session::AuthOptions;
use shared::AppState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authrelay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting auth helper server");

    let provider = Arc::new(
        GoTrueClient::from_env()
            .expect("SUPABASE_URL and SUPABASE_ANON_KEY must be set"),
    );
    let app_state = AppState::new(provider, AuthOptions::default());

    // build our application with the auth routes mounted under /api/auth
    let app = Router::new()
        .nest("/api/auth", auth::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
