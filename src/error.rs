//! # error
//!
//! Two error types live here.
//!
//! [`PipelineError`] is what a single upstream fetch can fail with. It never
//! escapes the pipeline: every failure is folded into a user-facing message on
//! the [`crate::models::DashboardReport`].
//!
//! [`AppError`] is what an HTTP handler of this service returns. Axum's
//! `IntoResponse` impl converts it into the `{"ok": false, "error": ..}` body
//! so the client always gets a machine-readable response even on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// Connection refused, DNS failure, non-2xx status. `message` is the
    /// upstream's own `message` field when it sent one.
    #[error("{message}")]
    Transport {
        status:  Option<u16>,
        message: String,
    },

    /// A body arrived but held no recognizable quote object.
    #[error("{0}")]
    DataShape(String),

    /// A body arrived but normalized to zero history points.
    #[error("No history data received")]
    EmptyHistory,
}

impl PipelineError {
    pub fn invalid_quote() -> Self {
        PipelineError::DataShape("Invalid price data received".into())
    }

    /// HTTP status the pricing service answered with, if it answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            PipelineError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::Transport {
            status:  err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    /// The request payload was syntactically correct but semantically invalid.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The pricing service could not be reached or answered with an error.
    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream(msg)   => (StatusCode::BAD_GATEWAY, msg.clone()),
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
