//! HTTP surface of the dashboard service.

pub mod dashboard;
pub mod stocks;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::SharedState;
use dashboard::{get_dashboard, get_dashboard_text, submit, update_selection};
use stocks::{health_check, list_stocks};

pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health",                   get(health_check))
        // ── Ticker picker ─────────────────────────────────────────────────────
        .route("/api/stocks",               get(list_stocks))
        // ── Dashboard ─────────────────────────────────────────────────────────
        .route("/api/dashboard",            get(get_dashboard))
        .route("/api/dashboard/text",       get(get_dashboard_text))
        .route("/api/dashboard/selection",  put(update_selection))
        .route("/api/dashboard/submit",     post(submit))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
