//! # models::listing
//!
//! One entry of the ticker picker.

use serde::{Deserialize, Serialize};

/// `{ "name": "Apple Inc.", "symbol": "AAPL" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockListing {
    pub name:   String,
    pub symbol: String,
}

impl StockListing {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self { name: name.into(), symbol: symbol.into() }
    }
}
