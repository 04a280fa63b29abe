//! # pipeline::aggregate
//!
//! Mean price over a history window. Pure, no I/O.

use crate::models::{AggregateResult, HistoryPoint};

/// Unweighted arithmetic mean of every point that carries a numeric price.
///
/// Points without one are left out of the sum *and* the count, never read
/// as zero. No numeric point at all → `mean_price: None`.
pub fn compute_mean(history: &[HistoryPoint]) -> AggregateResult {
    let (sum, count) = history
        .iter()
        .filter_map(|p| p.price)
        .fold((0.0_f64, 0_usize), |(sum, count), price| (sum + price, count + 1));

    AggregateResult {
        mean_price: (count > 0).then(|| sum / count as f64),
    }
}
