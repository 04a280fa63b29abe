//! # models::selection
//!
//! The only user-controlled input: which ticker, over how many minutes.

use serde::Serialize;

use crate::config::DEFAULT_WINDOW_MINUTES;

/// Clamp a raw window to `1..=u32::MAX`. Zero and negatives become 1.
pub fn clamp_window(minutes: i64) -> u32 {
    minutes.clamp(1, i64::from(u32::MAX)) as u32
}

/// Ticker + trailing window. Immutable once built; a change of mind is a new
/// `Selection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    ticker_symbol:  String,
    window_minutes: u32,
}

impl Selection {
    pub fn new(ticker_symbol: impl Into<String>, window_minutes: i64) -> Self {
        Self {
            ticker_symbol:  ticker_symbol.into().trim().to_string(),
            window_minutes: clamp_window(window_minutes),
        }
    }

    pub fn ticker_symbol(&self) -> &str {
        &self.ticker_symbol
    }

    pub fn window_minutes(&self) -> u32 {
        self.window_minutes
    }

    /// An empty ticker means nothing has been picked yet; fetches are no-ops.
    pub fn has_ticker(&self) -> bool {
        !self.ticker_symbol.is_empty()
    }

    pub fn with_ticker(&self, ticker_symbol: impl Into<String>) -> Self {
        Self::new(ticker_symbol, i64::from(self.window_minutes))
    }

    pub fn with_window(&self, window_minutes: i64) -> Self {
        Self::new(self.ticker_symbol.clone(), window_minutes)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new("", i64::from(DEFAULT_WINDOW_MINUTES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_clamped_to_one() {
        assert_eq!(Selection::new("AAPL", 0).window_minutes(), 1);
        assert_eq!(Selection::new("AAPL", -30).window_minutes(), 1);
        assert_eq!(Selection::new("AAPL", 45).window_minutes(), 45);
    }

    #[test]
    fn huge_window_saturates() {
        assert_eq!(clamp_window(i64::MAX), u32::MAX);
    }

    #[test]
    fn default_has_no_ticker_and_thirty_minutes() {
        let selection = Selection::default();
        assert!(!selection.has_ticker());
        assert_eq!(selection.window_minutes(), 30);
    }

    #[test]
    fn ticker_is_trimmed() {
        let selection = Selection::new("  NVDA ", 10);
        assert_eq!(selection.ticker_symbol(), "NVDA");
        assert!(!Selection::new("   ", 10).has_ticker());
    }

    #[test]
    fn with_ticker_keeps_window() {
        let selection = Selection::new("AAPL", 15).with_ticker("MSFT");
        assert_eq!(selection, Selection::new("MSFT", 15));
        assert_eq!(selection.with_window(0).window_minutes(), 1);
    }
}
