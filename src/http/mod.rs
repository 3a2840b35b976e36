//! HTTP surface: JSON API plus the front-end catch-all.

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::access::AccessRegistry;
use crate::config::GateConfig;
use crate::session::{SessionPolicy, SessionStore};
use crate::token::TokenIssuer;

/// Shared state handed to every handler.
pub struct AppState {
    pub registry: AccessRegistry,
    pub sessions: Arc<SessionStore>,
    pub issuer: TokenIssuer,
    pub session_policy: SessionPolicy,
    pub admin_password: String,
    pub proxy_url: String,
    pub public_dir: PathBuf,
}

impl AppState {
    /// Build state from configuration around an existing session store.
    pub fn new(config: &GateConfig, sessions: Arc<SessionStore>) -> Result<Self> {
        let issuer = TokenIssuer::new(&config.jwt_secret).context("Failed to create token issuer")?;

        Ok(Self {
            registry: AccessRegistry::new(config.proxy_code.clone(), config.chat_code.clone()),
            sessions,
            issuer,
            session_policy: config.session_policy,
            admin_password: config.admin_password.clone(),
            proxy_url: config.proxy_url.clone(),
            public_dir: config.public_dir.clone(),
        })
    }
}

/// Create the router with all endpoints.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/auth/access",
            post(handlers::exchange_code).fallback(handlers::index_document),
        )
        .route("/api/proxy-url", get(handlers::proxy_url))
        .route(
            "/api/auth/admin",
            post(handlers::admin_login).fallback(handlers::index_document),
        )
        .route("/api/health", get(handlers::health))
        .fallback(handlers::index_document)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &GateConfig, state: Arc<AppState>) -> Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server error")?;

    Ok(())
}
