//! # Tickerboard — Stock Dashboard Service
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐  PUT  /api/dashboard/selection  ┌──────────────────────┐
//!  │  Browser /   │ ──────────────────────────────▶ │ AppState             │
//!  │  curl        │  POST /api/dashboard/submit     │ ├─ selection         │
//!  │              │ ──────────────────────────────▶ │ ├─ report            │──┐
//!  │              │ ◀────────────────────────────── │ ├─ error / busy      │  │
//!  └──────────────┘  GET  /api/dashboard[/text]     │ └─ StockApi          │  │
//!                    GET  /api/stocks               └──────────────────────┘  │
//!                                                                             │
//!   Pricing service  ◀── GET /stocks · /stocks/{s} · /stocks/{s}/minutes=N ───┘
//!                        Authorization: Bearer $STOCK_API_TOKEN
//! ```
//!
//! ## Environment Variables
//!
//! | Variable                 | Default                                   | Description                 |
//! |--------------------------|-------------------------------------------|-----------------------------|
//! | `STOCK_API_BASE_URL`     | `http://20.244.56.144/evaluation-service` | Pricing service root        |
//! | `STOCK_API_TOKEN`        | — (required)                              | Bearer credential, server-side only |
//! | `DEFAULT_WINDOW_MINUTES` | `30`                                      | Window before the user picks one |
//! | `BIND_ADDR`              | `0.0.0.0:3000`                            | Address Axum listens on     |
//! | `RUST_LOG`               | `tickerboard=debug`                       | Tracing filter              |

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod error;
mod models;
mod pipeline;
mod render;
mod routes;
mod state;

#[cfg(test)]
mod testkit;

use config::Config;
use state::build_state;

// ─── Entry Point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional — deployments can use real env vars) ──────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("tickerboard=debug".parse()?)
                .add_directive("tower_http=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════╗
  ║   TICKERBOARD — Stock Exchange Dashboard  ║
  ║   Quote · History · Average Price         ║
  ╚═══════════════════════════════════════════╝"#);

    // ── 3. Config + shared state ──────────────────────────────────────────────
    let config = Config::from_env().context("Failed to load config")?;
    let state = build_state(&config);

    info!(
        upstream = %config.base_url,
        window   = config.default_window,
        "Pricing service configured"
    );

    // ── 4. Router ─────────────────────────────────────────────────────────────
    let app = routes::router(state);

    // ── 5. Bind & Serve ───────────────────────────────────────────────────────
    let addr = config.bind_addr;
    info!(?addr, "🚀 Tickerboard server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
