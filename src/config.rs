//! # config — read service configuration from environment variables
//!
//! `.env` is loaded by `main` through `dotenvy` before this runs.
//!
//! | Variable                 | Default                                    |
//! |--------------------------|--------------------------------------------|
//! | `STOCK_API_BASE_URL`     | `http://20.244.56.144/evaluation-service`  |
//! | `STOCK_API_TOKEN`        | — (required)                               |
//! | `DEFAULT_WINDOW_MINUTES` | `30`                                       |
//! | `BIND_ADDR`              | `0.0.0.0:3000`                             |

use std::net::SocketAddr;

use anyhow::{bail, Context};

use crate::models::selection::clamp_window;

pub const DEFAULT_BASE_URL: &str = "http://20.244.56.144/evaluation-service";
pub const DEFAULT_WINDOW_MINUTES: u32 = 30;

/// Everything the service needs at startup.
#[derive(Clone)]
pub struct Config {
    /// Root of the pricing service, without trailing slash
    pub base_url:        String,
    /// Bearer credential for the pricing service. Stays server-side.
    pub api_token:       String,
    /// Window applied when a submission does not carry one
    pub default_window:  u32,
    pub bind_addr:       SocketAddr,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("default_window", &self.default_window)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_token = std::env::var("STOCK_API_TOKEN")
            .context("STOCK_API_TOKEN environment variable is required")?;
        if api_token.trim().is_empty() {
            bail!("STOCK_API_TOKEN is set but empty");
        }

        let window: i64 = std::env::var("DEFAULT_WINDOW_MINUTES")
            .unwrap_or_else(|_| DEFAULT_WINDOW_MINUTES.to_string())
            .parse()
            .context("DEFAULT_WINDOW_MINUTES must be a number")?;

        let bind_addr: SocketAddr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let base_url = std::env::var("STOCK_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(base_url, api_token, window, bind_addr))
    }

    /// Build a config directly; used by `from_env` and by tests.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>, window: i64, bind_addr: SocketAddr) -> Self {
        Self {
            base_url:       base_url.into().trim_end_matches('/').to_string(),
            api_token:      api_token.into(),
            default_window: clamp_window(window),
            bind_addr,
        }
    }
}
