//! Domain models shared across the dashboard service.

pub mod listing;
pub mod quote;
pub mod report;
pub mod selection;

pub use listing::StockListing;
pub use quote::{HistoryPoint, Quote};
pub use report::{AggregateResult, DashboardReport, HistoryView, Section};
pub use selection::Selection;
