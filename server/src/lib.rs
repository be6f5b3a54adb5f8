//! Server-side relay for the Uibo chatbot.
//!
//! Exposes a single signing route, `POST /api/hunyuan`, that forwards the
//! user's message to the Tencent Hunyuan chat-completion endpoint with a
//! TC3-HMAC-SHA256 signature and relays the JSON reply (or the provider's
//! error payload) back to the widget. Credentials never leave this process.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use axum::routing::post;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(routes::health_handler))
        .route("/api/hunyuan", post(routes::chat_handler))
        .with_state(state)
}

pub async fn start_server() -> Result<()> {
    let config = Config::load();
    let port = config.port;
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with an error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {err}");
    }
    info!("shutdown requested");
}
