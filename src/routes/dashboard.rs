//! # routes::dashboard
//!
//! Selection, submit, and read-back of the dashboard.
//!
//! | Method | Path                       | Description                         |
//! |--------|----------------------------|-------------------------------------|
//! | GET    | `/api/dashboard`           | selection, busy, error, report      |
//! | GET    | `/api/dashboard/text`      | same, rendered as plain text        |
//! | PUT    | `/api/dashboard/selection` | `{symbol?, minutes?}`               |
//! | POST   | `/api/dashboard/submit`    | optional `{symbol, minutes?}`       |

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, models::Selection, render::render_text, state::SharedState};

#[derive(Debug, Deserialize)]
pub struct SelectionUpdate {
    pub symbol:  Option<String>,
    pub minutes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub symbol:  String,
    /// Falls back to the dashboard's current window
    pub minutes: Option<i64>,
}

// ─── GET /api/dashboard ───────────────────────────────────────────────────────

pub async fn get_dashboard(State(state): State<SharedState>) -> impl IntoResponse {
    let view = state.view().await;
    Json(json!({
        "ok":        true,
        "dashboard": view,
    }))
}

// ─── GET /api/dashboard/text ──────────────────────────────────────────────────

pub async fn get_dashboard_text(State(state): State<SharedState>) -> impl IntoResponse {
    render_text(&state.view().await)
}

// ─── PUT /api/dashboard/selection ─────────────────────────────────────────────

/// Ticker change clears shown results; window change only clamps and stores.
pub async fn update_selection(
    State(state): State<SharedState>,
    Json(update): Json<SelectionUpdate>,
) -> Result<impl IntoResponse, AppError> {
    if update.symbol.is_none() && update.minutes.is_none() {
        return Err(AppError::BadRequest(
            "Expected at least one of `symbol` or `minutes`".into(),
        ));
    }

    let selection = state
        .update_selection(update.symbol.as_deref(), update.minutes)
        .await;

    Ok(Json(json!({
        "ok":        true,
        "selection": selection,
    })))
}

// ─── POST /api/dashboard/submit ───────────────────────────────────────────────

/// Runs the pipeline. `ok` is false when either half failed; both halves are
/// in `report` regardless.
///
/// An empty body submits the current selection. A body that is not a valid
/// `SubmitRequest` is a 400 and nothing is fetched.
pub async fn submit(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let Json(req) = Json::<SubmitRequest>::from_bytes(&body)
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Some(req)
    };

    let selection = match request {
        Some(req) => {
            let minutes = match req.minutes {
                Some(m) => m,
                None => i64::from(state.view().await.selection.window_minutes()),
            };
            Some(Selection::new(req.symbol, minutes))
        }
        None => None,
    };

    let outcome = state.submit(selection).await;
    let error = outcome.report.error_message();

    Ok(Json(json!({
        "ok":        error.is_none(),
        "committed": outcome.committed,
        "error":     error,
        "report":    outcome.report,
    })))
}
