//! # pipeline::shape
//!
//! The pricing service is inconsistent about how it wraps its payloads. Each
//! endpoint gets an ordered list of shape matchers; the first one that
//! recognizes the body wins.
//!
//! ```text
//! GET /stocks               [ {name, symbol}, .. ]  |  {stocks: {name: symbol}}  |  {name: symbol}
//! GET /stocks/{s}           {stock: {price, ..}}    |  {price, ..}
//! GET /stocks/{s}/minutes=N [ {price, ..}, .. ]     |  {history: [..]}           |  {price, ..}
//! ```

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::PipelineError;
use crate::models::quote::{numeric_price, parse_timestamp};
use crate::models::{HistoryPoint, Quote, StockListing};

/// Recognize one payload shape and pull the normalized value out of it.
pub type ShapeMatcher<T> = fn(&Value) -> Option<T>;

/// Try `matchers` in order, stop at the first hit.
pub fn first_match<T>(body: &Value, matchers: &[ShapeMatcher<T>]) -> Option<T> {
    matchers.iter().find_map(|matcher| matcher(body))
}

// ─── Quote ────────────────────────────────────────────────────────────────────

pub const QUOTE_SHAPES: &[ShapeMatcher<Map<String, Value>>] = &[wrapped_quote, bare_quote];

fn wrapped_quote(body: &Value) -> Option<Map<String, Value>> {
    body.get("stock").and_then(Value::as_object).cloned()
}

fn bare_quote(body: &Value) -> Option<Map<String, Value>> {
    body.as_object().cloned()
}

/// Body of `GET /stocks/{symbol}` → [`Quote`].
///
/// Fails with `DataShape` when no quote object can be found or its price is
/// missing, non-numeric or not positive.
pub fn normalize_quote(body: &Value) -> Result<Quote, PipelineError> {
    let object = first_match(body, QUOTE_SHAPES).ok_or_else(PipelineError::invalid_quote)?;

    let price = object
        .get("price")
        .and_then(numeric_price)
        .filter(|p| *p > 0.0)
        .ok_or_else(PipelineError::invalid_quote)?;

    Ok(Quote {
        price,
        last_updated_at: object.get("lastUpdatedAt").and_then(parse_timestamp),
    })
}

// ─── History ──────────────────────────────────────────────────────────────────

pub const HISTORY_SHAPES: &[ShapeMatcher<Vec<HistoryPoint>>] =
    &[bare_history, wrapped_history, single_point_history];

fn bare_history(body: &Value) -> Option<Vec<HistoryPoint>> {
    body.as_array().map(|items| items.iter().map(HistoryPoint::from_value).collect())
}

fn wrapped_history(body: &Value) -> Option<Vec<HistoryPoint>> {
    body.get("history").and_then(bare_history)
}

fn single_point_history(body: &Value) -> Option<Vec<HistoryPoint>> {
    body.is_object().then(|| vec![HistoryPoint::from_value(body)])
}

/// Body of `GET /stocks/{symbol}/minutes=N` → ordered, unfiltered points.
pub fn normalize_history(body: &Value) -> Result<Vec<HistoryPoint>, PipelineError> {
    let points = first_match(body, HISTORY_SHAPES).unwrap_or_default();

    if points.is_empty() {
        return Err(PipelineError::EmptyHistory);
    }
    Ok(points)
}

// ─── Listing ──────────────────────────────────────────────────────────────────

pub const LISTING_SHAPES: &[ShapeMatcher<Vec<StockListing>>] =
    &[listing_array, listing_wrapped_map, listing_bare_map];

fn listing_array(body: &Value) -> Option<Vec<StockListing>> {
    let items = body.as_array()?;
    let listings = items
        .iter()
        .filter_map(|item| {
            let symbol = item.get("symbol").and_then(Value::as_str)?;
            let name = item.get("name").and_then(Value::as_str).unwrap_or(symbol);
            Some(StockListing::new(name, symbol))
        })
        .collect::<Vec<_>>();

    if listings.len() < items.len() {
        debug!(skipped = items.len() - listings.len(), "Listing entries without a symbol dropped");
    }
    Some(listings)
}

fn listing_wrapped_map(body: &Value) -> Option<Vec<StockListing>> {
    body.get("stocks").filter(|s| s.is_object()).and_then(listing_bare_map)
}

fn listing_bare_map(body: &Value) -> Option<Vec<StockListing>> {
    let map = body.as_object()?;
    Some(
        map.iter()
            .filter_map(|(name, symbol)| symbol.as_str().map(|s| StockListing::new(name.as_str(), s)))
            .collect(),
    )
}

/// Body of `GET /stocks` → `{name, symbol}` in response order. Unknown
/// shapes give an empty list; an empty list is not an error.
pub fn normalize_listing(body: &Value) -> Vec<StockListing> {
    first_match(body, LISTING_SHAPES).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const T: &str = "2025-05-08T04:26:27Z";

    // ── Quote ─────────────────────────────────────────────────────────────────

    #[test]
    fn wrapped_and_bare_quotes_are_identical() {
        let wrapped = normalize_quote(&json!({ "stock": { "price": 5.5, "lastUpdatedAt": T } })).unwrap();
        let bare = normalize_quote(&json!({ "price": 5.5, "lastUpdatedAt": T })).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(bare.price, 5.5);
        assert!(bare.last_updated_at.is_some());
    }

    #[test]
    fn quote_without_price_is_a_shape_error() {
        assert_eq!(
            normalize_quote(&json!({ "stock": { "lastUpdatedAt": T } })),
            Err(PipelineError::invalid_quote())
        );
        assert_eq!(
            normalize_quote(&json!({ "price": "5.5" })),
            Err(PipelineError::invalid_quote())
        );
    }

    #[test]
    fn non_object_quote_body_is_a_shape_error() {
        assert!(matches!(normalize_quote(&json!("oops")), Err(PipelineError::DataShape(_))));
        assert!(matches!(normalize_quote(&json!([1, 2])), Err(PipelineError::DataShape(_))));
        assert!(matches!(normalize_quote(&Value::Null), Err(PipelineError::DataShape(_))));
    }

    #[test]
    fn zero_price_is_rejected() {
        assert!(normalize_quote(&json!({ "price": 0 })).is_err());
        assert!(normalize_quote(&json!({ "price": -3.0 })).is_err());
    }

    #[test]
    fn non_object_stock_field_falls_back_to_bare() {
        let quote = normalize_quote(&json!({ "stock": "AAPL", "price": 12.0 })).unwrap();
        assert_eq!(quote.price, 12.0);
    }

    // ── History ───────────────────────────────────────────────────────────────

    #[test]
    fn three_history_shapes_normalize_alike() {
        let point = json!({ "price": 101.25, "lastUpdatedAt": T });

        let bare = normalize_history(&json!([point.clone()])).unwrap();
        let wrapped = normalize_history(&json!({ "history": [point.clone()] })).unwrap();
        let single = normalize_history(&point).unwrap();

        assert_eq!(bare.len(), 1);
        assert_eq!(bare, wrapped);
        assert_eq!(bare, single);
    }

    #[test]
    fn history_keeps_order_and_bad_entries() {
        let points = normalize_history(&json!([
            { "price": 3.0 },
            { "price": "bad" },
            { "price": 1.0 },
        ]))
        .unwrap();
        let prices: Vec<_> = points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![Some(3.0), None, Some(1.0)]);
    }

    #[test]
    fn empty_history_is_an_error() {
        assert_eq!(normalize_history(&json!([])), Err(PipelineError::EmptyHistory));
        assert_eq!(normalize_history(&json!({ "history": [] })), Err(PipelineError::EmptyHistory));
        assert_eq!(normalize_history(&json!("nothing")), Err(PipelineError::EmptyHistory));
        assert_eq!(normalize_history(&Value::Null), Err(PipelineError::EmptyHistory));
    }

    // ── Listing ───────────────────────────────────────────────────────────────

    #[test]
    fn three_listing_shapes_normalize_alike() {
        let expected = vec![
            StockListing::new("Apple Inc.", "AAPL"),
            StockListing::new("Nvidia Corporation", "NVDA"),
        ];

        let array = json!([
            { "name": "Apple Inc.", "symbol": "AAPL" },
            { "name": "Nvidia Corporation", "symbol": "NVDA" },
        ]);
        let wrapped = json!({ "stocks": { "Apple Inc.": "AAPL", "Nvidia Corporation": "NVDA" } });
        let bare = json!({ "Apple Inc.": "AAPL", "Nvidia Corporation": "NVDA" });

        assert_eq!(normalize_listing(&array), expected);
        assert_eq!(normalize_listing(&wrapped), expected);
        assert_eq!(normalize_listing(&bare), expected);
    }

    #[test]
    fn map_listing_keeps_response_order() {
        let body: Value = serde_json::from_str(r#"{"Zoom": "ZM", "Apple": "AAPL", "Meta": "META"}"#).unwrap();
        let symbols: Vec<_> = normalize_listing(&body).into_iter().map(|l| l.symbol).collect();
        assert_eq!(symbols, vec!["ZM", "AAPL", "META"]);
    }

    #[test]
    fn array_entry_without_name_uses_symbol() {
        let listing = normalize_listing(&json!([{ "symbol": "AMD" }, { "name": "no symbol" }]));
        assert_eq!(listing, vec![StockListing::new("AMD", "AMD")]);
    }

    #[test]
    fn unknown_listing_shape_is_empty() {
        assert!(normalize_listing(&json!(17)).is_empty());
        assert!(normalize_listing(&json!({})).is_empty());
    }

    #[test]
    fn first_match_stops_at_first_hit() {
        let matchers: &[ShapeMatcher<&'static str>] = &[
            |_| None,
            |_| Some("second"),
            |_| Some("third"),
        ];
        assert_eq!(first_match(&Value::Null, matchers), Some("second"));
    }
}
