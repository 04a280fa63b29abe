//! # routes::stocks
//!
//! Ticker picker + liveness.

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::{error::AppError, state::SharedState};

// ─── GET /api/stocks ──────────────────────────────────────────────────────────

/// Normalized `{name, symbol}` list straight from the pricing service
pub async fn list_stocks(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let stocks = state.list_stocks().await.map_err(|e| {
        error!(error = %e, upstream_status = ?e.upstream_status(), "Error fetching /stocks");
        AppError::Upstream(format!("Failed to fetch stocks. {e}"))
    })?;

    Ok(Json(json!({
        "ok":     true,
        "count":  stocks.len(),
        "stocks": stocks,
    })))
}

// ─── GET /health ──────────────────────────────────────────────────────────────

pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "ok":   true,
        "busy": state.is_busy(),
    }))
}
