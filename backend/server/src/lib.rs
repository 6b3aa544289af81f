//! Documentation of the Anika Blue voting service.
//!
//! Visitors are shown random shades of blue and vote on whether each one is
//! "Anika Blue". The service keeps a running average of every visitor's yes
//! votes and of everyone's yes votes together, and names each color both
//! descriptively and by its nearest CSS keyword.
//!
//!
//!
//! # General Infrastructure
//! - Single axum server, JSON responses
//! - Redis holds every vote, shown shade and base color
//! - Sessions are an opaque random cookie, no accounts
//!
//!
//!
//! # Routes
//!
//! | Route | Method | Input | Output |
//! |---|---|---|---|
//! | `/next-shade` | GET | session | shade + naming details |
//! | `/vote` | POST | `shade`, `vote` (yes/no/skip) | user and global averages |
//! | `/stats` | GET | session | user and global averages |
//! | `/save-base-color` | POST | session | base color, 400 before the first yes vote |
//! | `/load-base-color` | POST | `base_color` | restored session, 400 invalid, 404 unknown |
//! | `/__livereload` | GET | | fingerprint of watched files, debug mode only |
//!
//!
//!
//! # Base Colors
//! A visitor's base color is the average of their yes votes, saved after every
//! vote. Presenting it on another device restores the session that saved it.
//! Only exact `#rrggbb` matches count.
//!
//!
//!
//! # Setup
//!
//! Run against a local redis.
//! ```sh
//! REDIS_URL=redis://127.0.0.1:6379 cargo run --bin anika-blue
//! ```
//!
//! Run without redis, votes are lost on exit.
//! ```sh
//! STORAGE=memory DEBUG=1 RUST_LOG=info cargo run --bin anika-blue
//! ```
//!
//! Redis-backed tests.
//! ```sh
//! REDIS_URL=redis://127.0.0.1:6379 cargo test -- --ignored
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod color;
pub mod config;
pub mod database;
pub mod error;
pub mod livereload;
pub mod routes;
pub mod session;
pub mod state;
pub mod utils;

use config::Config;
use error::StartupError;
use routes::{
    livereload_handler, load_base_color_handler, next_shade_handler, save_base_color_handler,
    stats_handler, vote_handler,
};
use session::ensure_user_id;
use state::AppState;

pub async fn start_server() -> Result<(), StartupError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config).await?;

    if state.live_reload.is_some() {
        info!("Debug mode, live reload enabled");
    }

    info!("Starting server...");

    let address = format!("{}:{}", state.config.host, state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let session_routes = Router::new()
        .route("/next-shade", get(next_shade_handler))
        .route("/vote", post(vote_handler))
        .route("/stats", get(stats_handler))
        .route("/save-base-color", post(save_base_color_handler))
        .route_layer(middleware::from_fn(ensure_user_id));

    Router::new()
        .merge(session_routes)
        .route("/load-base-color", post(load_base_color_handler))
        .route("/__livereload", get(livereload_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
