//! Entry point: load config, wire dependencies, and run the server.

use axum::routing::get_service;
use chrono::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wicket::auth::Sessions;
use wicket::config::Config;
use wicket::db;
use wicket::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_pool = db::create_pool(&config.database_url).await?;
    let sessions = Sessions::new(Duration::days(config.session_ttl_days));

    let state = AppState {
        db: db_pool.clone(),
        sessions,
    };

    // Hourly sweep of expired session rows; live requests also drop
    // expired sessions on touch.
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            tick.tick().await;
            match db::session_delete_expired(&db_pool).await {
                Ok(n) if n > 0 => tracing::debug!(removed = n, "expired sessions swept"),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "session sweep failed"),
            }
        }
    });

    let app = create_app(state)
        // Root (/): the home page
        .route_service(
            "/",
            get_service(tower_http::services::ServeFile::new("site_static/home.html")),
        )
        // Auth pages
        .route_service(
            "/login.html",
            get_service(tower_http::services::ServeFile::new(
                "site_static/login.html",
            )),
        )
        .route_service(
            "/sign-up.html",
            get_service(tower_http::services::ServeFile::new(
                "site_static/sign-up.html",
            )),
        );

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
