//! Endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, Method},
    response::Html,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::GateError;
use super::AppState;
use crate::access::Service;

/// Header carrying the caller's session ID.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Deserialize)]
pub struct AccessRequest {
    /// Any JSON value; only strings can match a configured code.
    pub code: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    pub success: bool,
    pub service: Service,
    pub session_id: String,
    pub redirect_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyUrlResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub sessions: usize,
    pub codes: Vec<String>,
}

/// POST /api/auth/access
pub async fn exchange_code(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AccessRequest>, JsonRejection>,
) -> Result<Json<AccessResponse>, GateError> {
    let code = payload
        .ok()
        .and_then(|Json(request)| request.code)
        .filter(|code| !code.is_null())
        .ok_or(GateError::MissingInput("Code required"))?;

    let service = code
        .as_str()
        .and_then(|code| state.registry.resolve(code))
        .ok_or_else(|| {
            warn!("Invalid access code");
            GateError::InvalidCredential("Invalid access code")
        })?;

    let session_id = state.sessions.create(service)?;
    info!(session_id = %session_id, service = %service, "Session created");

    Ok(Json(AccessResponse {
        success: true,
        service,
        session_id: session_id.to_hex(),
        redirect_url: service.redirect_url().to_string(),
    }))
}

/// GET /api/proxy-url
pub async fn proxy_url(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ProxyUrlResponse>, GateError> {
    let presented = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok());

    let session = state
        .session_policy
        .resolve(&state.sessions, presented, Service::Proxy)?
        .ok_or_else(|| {
            debug!("No proxy session found");
            GateError::InvalidCredential("No valid proxy session")
        })?;

    if session.service != Service::Proxy {
        warn!(
            session_id = %session.id,
            service = %session.service,
            "Wrong service for proxy request"
        );
        return Err(GateError::InvalidCredential("Invalid session - wrong service"));
    }

    Ok(Json(ProxyUrlResponse {
        url: state.proxy_url.clone(),
    }))
}

/// POST /api/auth/admin
pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> Result<Json<AdminLoginResponse>, GateError> {
    let request = payload.ok().map(|Json(request)| request);
    let (password, username) = match request {
        Some(r) => (r.password, r.username),
        None => (None, None),
    };

    if password.as_deref() != Some(state.admin_password.as_str()) {
        warn!("Admin login rejected");
        return Err(GateError::InvalidCredential("Invalid admin password"));
    }

    let issued = state.issuer.issue_admin_token(username.as_deref())?;
    info!(username = ?username, expires_in = issued.expires_in, "Admin login");

    Ok(Json(AdminLoginResponse {
        success: true,
        token: issued.token,
    }))
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, GateError> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        sessions: state.sessions.size()?,
        codes: state
            .registry
            .services()
            .into_iter()
            .map(String::from)
            .collect(),
    }))
}

/// Catch-all: serve the front-end entry document for any other GET or HEAD.
pub async fn index_document(
    State(state): State<Arc<AppState>>,
    method: Method,
) -> Result<Html<String>, GateError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(GateError::NotFound("Not found"));
    }

    let path = state.public_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(document) => Ok(Html(document)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Entry document unavailable");
            Err(GateError::NotFound("Not found"))
        }
    }
}
