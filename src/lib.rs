//! Session-based user accounts for a small website.
//!
//! Provides sign-up, login, and logout over classic form POSTs, with
//! database-backed sessions referenced by a browser cookie and one-shot
//! flash messages between redirects.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post};
use handlers::http;
use tower_http::trace::TraceLayer;

/// Build the API router (auth flows, me/messages, health). Used by main
/// and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let auth_routes = axum::Router::new()
        .route("/sign-up", post(auth::sign_up))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    axum::Router::new()
        .route("/health", get(http::health))
        .route("/api/me", get(auth::current_user))
        .route("/api/messages", get(flash::messages))
        .nest("/auth", auth_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
