//! # render — plain-text dashboard
//!
//! ```text
//! Stock Exchange Dashboard
//! Selection: AAPL, last 30 minutes
//!
//! Current Price for AAPL
//!   Price:        $231.95
//!   Last Updated: 2025-05-08 04:30:00 UTC
//!
//! Average Price Calculation
//!   Average price over last 30 minutes: $115.00
//!
//! Price History (Last 30 minutes)
//!   Price        | Last Updated
//!   -------------+------------------------
//!   $100.00      | 2025-05-08 04:00:00 UTC
//!   N/A          | N/A
//! ```
//!
//! Rounding to cents happens here and nowhere else.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::state::DashboardView;

const NA: &str = "N/A";

fn money(price: Option<f64>) -> String {
    price.map_or_else(|| NA.to_string(), |p| format!("${p:.2}"))
}

fn timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(|| NA.to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dashboard(&mut out, view);
    out
}

fn write_dashboard(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "Stock Exchange Dashboard")?;

    let selection = &view.selection;
    if selection.has_ticker() {
        writeln!(
            out,
            "Selection: {}, last {} minutes",
            selection.ticker_symbol(),
            selection.window_minutes()
        )?;
    } else {
        writeln!(out, "Selection: none (select a stock)")?;
    }

    if view.busy {
        writeln!(out, "Loading...")?;
    }

    if let Some(error) = &view.error {
        writeln!(out, "\nError: {error}")?;
    }

    let Some(report) = &view.report else {
        return Ok(());
    };
    let symbol = report.selection.ticker_symbol();
    let minutes = report.selection.window_minutes();

    if let Some(quote) = report.quote.ok() {
        writeln!(out, "\nCurrent Price for {symbol}")?;
        writeln!(out, "  Price:        {}", money(Some(quote.price)))?;
        writeln!(out, "  Last Updated: {}", timestamp(quote.last_updated_at))?;
    }

    if let Some(mean) = report.mean_price() {
        writeln!(out, "\nAverage Price Calculation")?;
        writeln!(out, "  Average price over last {minutes} minutes: {}", money(Some(mean)))?;
    }

    if let Some(history) = report.history.ok() {
        writeln!(out, "\nPrice History (Last {minutes} minutes)")?;
        writeln!(out, "  {:<12} | Last Updated", "Price")?;
        writeln!(out, "  {:-<12}-+-{:-<23}", "", "")?;
        for point in &history.points {
            writeln!(
                out,
                "  {:<12} | {}",
                money(point.price),
                timestamp(point.last_updated_at)
            )?;
        }
    }

    Ok(())
}
