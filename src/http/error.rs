//! Request errors and their JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("{0}")]
    MissingInput(&'static str),

    #[error("{0}")]
    InvalidCredential(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl GateError {
    pub fn status(&self) -> StatusCode {
        match self {
            GateError::MissingInput(_) => StatusCode::BAD_REQUEST,
            GateError::InvalidCredential(_) => StatusCode::UNAUTHORIZED,
            GateError::NotFound(_) => StatusCode::NOT_FOUND,
            GateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let message = match &self {
            GateError::Internal(e) => {
                tracing::warn!(error = %e, "Request failed");
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = serde_json::json!({ "error": message });
        (self.status(), Json(body)).into_response()
    }
}
