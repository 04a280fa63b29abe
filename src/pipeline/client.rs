//! # pipeline::client
//!
//! **Stock API client** — read-only calls to the pricing service over HTTP.
//!
//! ## Upstream contract
//! | Method | Path                         | Body shapes (see `shape`)               |
//! |--------|------------------------------|-----------------------------------------|
//! | GET    | `/stocks`                    | array · `{stocks: map}` · map           |
//! | GET    | `/stocks/{symbol}`           | `{stock: quote}` · quote                |
//! | GET    | `/stocks/{symbol}/minutes=N` | array · `{history: array}` · one point  |
//!
//! `{symbol}` is always sent as one percent-encoded path segment.
//! Every request carries `Authorization: Bearer <STOCK_API_TOKEN>`.
//! No retry, no timeout of our own: reqwest's defaults apply.

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::PipelineError;
use crate::models::{HistoryPoint, Quote, StockListing};
use crate::pipeline::shape::{normalize_history, normalize_listing, normalize_quote};

#[derive(Clone)]
pub struct StockApi {
    /// Shared, connection-pooled client
    http:     reqwest::Client,
    base_url: String,
    token:    String,
}

impl StockApi {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            token:    config.api_token.clone(),
        }
    }

    // ── Operations ────────────────────────────────────────────────────────────

    /// GET /stocks → ordered `{name, symbol}` list.
    pub async fn list_stocks(&self) -> Result<Vec<StockListing>, PipelineError> {
        let body = self.get_json(&["stocks"]).await?;
        let listing = normalize_listing(&body);

        if listing.is_empty() {
            warn!(response = %body, "No stocks found in /stocks response");
        }
        Ok(listing)
    }

    /// GET /stocks/{symbol} → current quote.
    ///
    /// `Ok(None)` when `symbol` is empty: nothing is sent.
    pub async fn fetch_current_quote(&self, symbol: &str) -> Result<Option<Quote>, PipelineError> {
        if symbol.is_empty() {
            return Ok(None);
        }

        let body = self.get_json(&["stocks", symbol]).await?;
        normalize_quote(&body).map(Some)
    }

    /// GET /stocks/{symbol}/minutes={window} → history, unfiltered.
    ///
    /// `Ok(None)` when `symbol` is empty or `window_minutes` is 0: nothing is
    /// sent.
    pub async fn fetch_price_history(
        &self,
        symbol: &str,
        window_minutes: u32,
    ) -> Result<Option<Vec<HistoryPoint>>, PipelineError> {
        if symbol.is_empty() || window_minutes == 0 {
            return Ok(None);
        }

        let body = self
            .get_json(&["stocks", symbol, &format!("minutes={window_minutes}")])
            .await?;
        normalize_history(&body).map(Some)
    }

    // ── Transport ─────────────────────────────────────────────────────────────

    /// `base_url` + `segments`, each segment escaped on its own so `?`, `#`
    /// or `/` inside a symbol cannot reach another endpoint.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, PipelineError> {
        let invalid = |reason: String| PipelineError::Transport {
            status:  None,
            message: format!("Invalid pricing service URL {}: {reason}", self.base_url),
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// One authenticated GET. Bodies that are not JSON come back as
    /// `Value::String` and are left for the shape matchers to reject.
    async fn get_json(&self, segments: &[&str]) -> Result<Value, PipelineError> {
        let url = self.endpoint(segments)?;

        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Pricing service unreachable");
                PipelineError::from(e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(PipelineError::from)?;

        if !status.is_success() {
            error!(http_status = %status, body = %text, url = %url, "Pricing service returned HTTP error");
            return Err(PipelineError::Transport {
                status:  Some(status.as_u16()),
                message: upstream_message(&text)
                    .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16())),
            });
        }

        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        debug!(url = %url, response = %body, "Pricing service response");
        Ok(body)
    }
}

/// `message` field of a JSON error body, if there is one.
fn upstream_message(text: &str) -> Option<String> {
    serde_json::from_str::<Value>(text)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
