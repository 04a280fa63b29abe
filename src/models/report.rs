//! # models::report
//!
//! The result of one submission. Quote and history are reported side by side
//! and independently: one failing never hides the other.
//!
//! ```json
//! {
//!   "requestId": "4f1c…",
//!   "selection": { "tickerSymbol": "AAPL", "windowMinutes": 30 },
//!   "quote":   { "status": "ok",    "data": { "price": 231.95, "lastUpdatedAt": "…" } },
//!   "history": { "status": "error", "data": "No history data received" },
//!   "fetchedAt": "…"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::PipelineError;
use crate::models::{HistoryPoint, Quote, Selection};
use crate::pipeline::aggregate::compute_mean;

const QUOTE_ERROR_PREFIX:   &str = "Failed to fetch current price.";
const HISTORY_ERROR_PREFIX: &str = "Failed to fetch price history.";

// ─── Section ──────────────────────────────────────────────────────────────────

/// Outcome of one half of a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Ok(T),
    /// User-facing failure text
    Error(String),
    /// Input was empty, nothing was requested
    Skipped,
}

impl<T> Section<T> {
    /// `Ok(None)` is the no-op case of a fetch.
    pub fn from_fetch(result: Result<Option<T>, PipelineError>) -> Self {
        match result {
            Ok(Some(value)) => Section::Ok(value),
            Ok(None)        => Section::Skipped,
            Err(err)        => Section::Error(err.to_string()),
        }
    }

    pub fn ok(&self) -> Option<&T> {
        match self {
            Section::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

// ─── Aggregate ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    /// `None` when no history point had a numeric price.
    pub mean_price: Option<f64>,
}

/// History as returned (unfiltered) plus the mean derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryView {
    pub points:    Vec<HistoryPoint>,
    pub aggregate: AggregateResult,
}

impl HistoryView {
    pub fn new(points: Vec<HistoryPoint>) -> Self {
        let aggregate = compute_mean(&points);
        Self { points, aggregate }
    }
}

// ─── DashboardReport ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// Tags the submission so a late answer for an old one can be dropped.
    pub request_id: Uuid,
    pub selection:  Selection,
    pub quote:      Section<Quote>,
    pub history:    Section<HistoryView>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardReport {
    /// Single user-facing error line, `None` when both halves succeeded or
    /// were skipped.
    pub fn error_message(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.quote.error().map(|e| format!("{QUOTE_ERROR_PREFIX} {e}")),
            self.history.error().map(|e| format!("{HISTORY_ERROR_PREFIX} {e}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub fn mean_price(&self) -> Option<f64> {
        self.history.ok().and_then(|h| h.aggregate.mean_price)
    }
}
