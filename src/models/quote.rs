//! # models::quote
//!
//! Defines [`Quote`] and [`HistoryPoint`], the two price observations the
//! pricing service hands back.
//!
//! Both arrive as loosely-typed JSON (`{"price": 231.95, "lastUpdatedAt":
//! "2025-05-08T04:26:27.4658491Z"}`). A `Quote` is only ever built from a
//! validated body, while a `HistoryPoint` keeps whatever it was given so the
//! aggregation step can decide what counts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Current price of one ticker at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Always finite and positive.
    pub price: f64,

    /// `None` when the service omitted the field or sent something that is
    /// not a timestamp.
    pub last_updated_at: Option<DateTime<Utc>>,
}

/// One sampled instant inside the requested window.
///
/// `price` is `None` when the entry had no price or a non-numeric one
/// (`"price": "bad"`). Such entries stay in the history and are skipped by
/// [`crate::pipeline::aggregate::compute_mean`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub price:           Option<f64>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl HistoryPoint {
    /// Build a point from one history entry. Never fails.
    pub fn from_value(entry: &Value) -> Self {
        Self {
            price:           entry.get("price").and_then(numeric_price),
            last_updated_at: entry.get("lastUpdatedAt").and_then(parse_timestamp),
        }
    }
}

/// Numeric JSON value as `f64`. Strings holding digits are *not* numbers.
pub fn numeric_price(value: &Value) -> Option<f64> {
    value.as_f64().filter(|p| p.is_finite())
}

/// RFC 3339 string or epoch milliseconds → UTC timestamp.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}
