//! Job Board Server
//!
//! REST API for a job board: filtered listing search, autocomplete
//! suggestions over bundled reference data, paid checkout for new postings
//! and magic-link sign-in for recruiters, using Axum.

use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod auth;
pub mod config;
pub mod consts;
pub mod error;
pub mod mail;
pub mod payments;
pub mod routes;
pub mod state;
pub mod store;

use config::Config;
use state::AppState;

pub fn router(state: std::sync::Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root_handler))
        .route(
            "/jobs",
            get(routes::search_jobs_handler).post(routes::create_job_handler),
        )
        .route("/recruiter-jobs/{email}", get(routes::recruiter_jobs_handler))
        .route("/checkout-session", post(routes::checkout_session_handler))
        .route("/validate-purchase/{id}", get(routes::validate_purchase_handler))
        .route("/start-challenge", post(routes::start_challenge_handler))
        .route("/sign-in", post(routes::sign_in_handler))
        .route("/signed-in", get(routes::signed_in_handler))
        .route("/sign-out", post(routes::sign_out_handler))
        .route("/suggest/locations", get(routes::suggest_locations_handler))
        .route("/suggest/skills", get(routes::suggest_skills_handler))
        .route("/salary-bands", get(routes::salary_bands_handler))
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    info!("Initializing state...");
    let state = AppState::new(Config::load())?;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = router(state.clone()).layer(cors);

    let address = format!("{}:{}", state.config.host, state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
