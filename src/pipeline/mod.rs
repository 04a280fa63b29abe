//! # pipeline
//!
//! **Price Pipeline** — selection in, report out.
//!
//! ```text
//!            ┌─ fetch_current_quote(symbol) ─────────────────────────┐
//! Selection ─┤                                                       ├─▶ DashboardReport
//!            └─ fetch_price_history(symbol, N) ─▶ compute_mean(..) ──┘
//! ```
//!
//! Both fetches run concurrently and own their own result; a failure on one
//! side is reported next to the other side's success.

pub mod aggregate;
pub mod client;
pub mod shape;

use chrono::Utc;
use futures_util::future::join;
use tracing::info;
use uuid::Uuid;

use crate::models::{DashboardReport, HistoryView, Section, Selection};
use client::StockApi;

/// Run one submission for `selection`, tagged with `request_id`.
pub async fn run_selection(api: &StockApi, selection: &Selection, request_id: Uuid) -> DashboardReport {
    let symbol = selection.ticker_symbol();

    let quote = api.fetch_current_quote(symbol);
    let history = async {
        api.fetch_price_history(symbol, selection.window_minutes())
            .await
            .map(|points| points.map(HistoryView::new))
    };

    let (quote, history) = join(quote, history).await;

    let report = DashboardReport {
        request_id,
        selection: selection.clone(),
        quote:     Section::from_fetch(quote),
        history:   Section::from_fetch(history),
        fetched_at: Utc::now(),
    };

    info!(
        request_id = %request_id,
        symbol     = %symbol,
        window     = selection.window_minutes(),
        price      = ?report.quote.ok().map(|q| q.price),
        mean_price = ?report.mean_price(),
        error      = ?report.error_message(),
        "📈 Selection fetched"
    );

    report
}
