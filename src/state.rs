//! # state
//!
//! AppState — the dashboard the client sees: current selection, the last
//! committed report, the busy flag and the error line.
//!
//! Submissions may overlap. Each one is tagged with a fresh request id and
//! only the newest id may commit; anything older that lands late is dropped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::models::{DashboardReport, Selection, StockListing};
use crate::error::PipelineError;
use crate::pipeline::{self, client::StockApi};

// ─── Dashboard ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct Dashboard {
    selection:      Selection,
    report:         Option<DashboardReport>,
    error:          Option<String>,
    /// Id of the newest submission; the only one allowed to commit
    latest_request: Option<Uuid>,
}

/// Read-only snapshot handed to routes and the text renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub selection: Selection,
    pub busy:      bool,
    pub error:     Option<String>,
    pub report:    Option<DashboardReport>,
}

/// What `submit` hands back to the caller.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub report:    DashboardReport,
    /// `false` when a newer submission or selection change superseded this one
    pub committed: bool,
}

// ─── Busy guard ───────────────────────────────────────────────────────────────

/// Holds the busy flag for the lifetime of one submission. Dropping it
/// releases the flag on every exit path.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn acquire(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

// ─── AppState ─────────────────────────────────────────────────────────────────

/// Top-level shared state injected into every Axum handler.
pub struct AppState {
    /// Pricing service client (shares one reqwest connection pool)
    pub api: StockApi,

    dashboard: RwLock<Dashboard>,

    /// Submissions currently running; busy while > 0
    in_flight: AtomicUsize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, config: &Config) -> Self {
        Self {
            api:       StockApi::new(http, config),
            dashboard: RwLock::new(Dashboard {
                selection: Selection::new("", i64::from(config.default_window)),
                ..Dashboard::default()
            }),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn view(&self) -> DashboardView {
        let dashboard = self.dashboard.read().await;
        DashboardView {
            selection: dashboard.selection.clone(),
            busy:      self.is_busy(),
            error:     dashboard.error.clone(),
            report:    dashboard.report.clone(),
        }
    }

    /// Ticker picker contents. Not cached: every call goes upstream.
    pub async fn list_stocks(&self) -> Result<Vec<StockListing>, PipelineError> {
        let _busy = BusyGuard::acquire(&self.in_flight);
        self.api.list_stocks().await
    }

    /// Apply a ticker and/or window change as one write. A ticker change
    /// clears the shown results; a window change only clamps (≥ 1) and stores.
    pub async fn update_selection(&self, symbol: Option<&str>, minutes: Option<i64>) -> Selection {
        let mut dashboard = self.dashboard.write().await;

        if let Some(symbol) = symbol {
            dashboard.selection = dashboard.selection.with_ticker(symbol);
            dashboard.report = None;
            dashboard.error = None;
            info!(symbol = %dashboard.selection.ticker_symbol(), "🎯 Ticker selected");
        }
        if let Some(minutes) = minutes {
            dashboard.selection = dashboard.selection.with_window(minutes);
        }

        dashboard.selection.clone()
    }

    /// Fetch quote + history for `selection` (or the current selection when
    /// `None`) and commit the report unless something newer came along.
    pub async fn submit(&self, selection: Option<Selection>) -> SubmitOutcome {
        let request_id = Uuid::new_v4();

        let selection = {
            let mut dashboard = self.dashboard.write().await;
            if let Some(selection) = selection {
                if selection.ticker_symbol() != dashboard.selection.ticker_symbol() {
                    dashboard.report = None;
                }
                dashboard.selection = selection;
            }
            dashboard.error = None;
            dashboard.latest_request = Some(request_id);
            dashboard.selection.clone()
        };

        let report = {
            let _busy = BusyGuard::acquire(&self.in_flight);
            pipeline::run_selection(&self.api, &selection, request_id).await
        };

        let committed = self.commit(&report).await;
        SubmitOutcome { report, committed }
    }

    async fn commit(&self, report: &DashboardReport) -> bool {
        let mut dashboard = self.dashboard.write().await;

        let fresh = dashboard.latest_request == Some(report.request_id)
            && dashboard.selection == report.selection;
        if !fresh {
            debug!(request_id = %report.request_id, "Discarding stale report");
            return false;
        }

        dashboard.error = report.error_message();
        dashboard.report = Some(report.clone());
        true
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: &Config) -> SharedState {
    Arc::new(AppState::new(config))
}
