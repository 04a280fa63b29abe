//! # testkit — in-process stand-in for the pricing service
//!
//! Binds an axum router on `127.0.0.1:0` under the same `/evaluation-service`
//! prefix the real service uses. Every request is counted and its
//! `Authorization` header recorded so tests can assert what went upstream.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};

use crate::config::Config;
use crate::pipeline::client::StockApi;
use crate::state::{AppState, SharedState};

pub const TEST_TOKEN: &str = "test-token";
const PREFIX: &str = "/evaluation-service";

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body:   Value,
    delay:  Option<Duration>,
}

#[derive(Clone, Default)]
pub struct StubUpstream {
    routes:   Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl StubUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` (relative to the prefix, e.g. `/stocks/AAPL`) with 200.
    pub fn json(self, path: &str, body: Value) -> Self {
        self.respond(path, StatusCode::OK, body, None)
    }

    pub fn status(self, path: &str, status: StatusCode, body: Value) -> Self {
        self.respond(path, status, body, None)
    }

    pub fn delayed(self, path: &str, body: Value, delay: Duration) -> Self {
        self.respond(path, StatusCode::OK, body, Some(delay))
    }

    fn respond(self, path: &str, status: StatusCode, body: Value, delay: Option<Duration>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned { status, body, delay });
        self
    }

    /// Paths seen so far, prefix stripped, in arrival order.
    pub fn paths(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.requests.lock().unwrap().iter().map(|(_, a)| a.clone()).collect()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Serve on an ephemeral port; returns the base URL including the prefix.
    pub async fn serve(&self) -> String {
        let app = Router::new().fallback(answer).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}{PREFIX}")
    }

    /// Serve and hand back a client already pointed at the stub.
    pub async fn api(&self) -> StockApi {
        let base_url = self.serve().await;
        StockApi::new(http_client(), &test_config(&base_url))
    }

    /// Serve and hand back a fresh dashboard wired to the stub.
    pub async fn state(&self) -> SharedState {
        let base_url = self.serve().await;
        Arc::new(AppState::with_http(http_client(), &test_config(&base_url)))
    }
}

pub fn test_config(base_url: &str) -> Config {
    Config::new(base_url, TEST_TOKEN, 30, "127.0.0.1:0".parse().unwrap())
}

/// Loopback traffic must not be routed through an ambient HTTP proxy.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

async fn answer(State(stub): State<StubUpstream>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().strip_prefix(PREFIX).unwrap_or(uri.path()).to_string();
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    stub.requests.lock().unwrap().push((path.clone(), auth));

    let canned = stub.routes.lock().unwrap().get(&path).cloned();
    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            (canned.status, Json(canned.body)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "stock not found" })),
        )
            .into_response(),
    }
}
