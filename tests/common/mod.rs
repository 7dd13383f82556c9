//! Common test utilities for openmldb-rs integration tests.
//!
//! # Fake API server
//!
//! [`FakeApiServer`] is an in-process axum server bound to an ephemeral port.
//! It records every request it receives and answers from a script, so the
//! full HTTP path can be exercised without an OpenMLDB deployment.
//!
//! # Live API server
//!
//! Tests marked `#[ignore]` talk to a real API server:
//!
//! | Environment Variable | Default            |
//! |----------------------|--------------------|
//! | `OPENMLDB_APISERVER` | "127.0.0.1:9527"   |
//! | `OPENMLDB_DATABASE`  | "test_db"          |
//!
//! ```bash
//! OPENMLDB_APISERVER=10.0.0.5:9527 cargo test --test integration_tests -- --ignored
//! ```

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use std::collections::VecDeque;
use std::env;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default API server address for live tests.
pub const DEFAULT_APISERVER: &str = "127.0.0.1:9527";

/// Default database for live tests.
pub const DEFAULT_DATABASE: &str = "test_db";

const ENV_APISERVER: &str = "OPENMLDB_APISERVER";
const ENV_DATABASE: &str = "OPENMLDB_DATABASE";

/// Body returned when nothing is scripted.
pub const EMPTY_OK: &str = r#"{"code":0,"msg":"ok"}"#;

// ============================================================================
// Fake API server
// ============================================================================

/// One request as seen by the fake server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Database path segment, percent-decoded
    pub database: String,
    /// Request body, `Value::Null` if it was not JSON
    pub body: serde_json::Value,
}

/// Canned reply for the next request.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl ScriptedResponse {
    pub fn ok(body: &str) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    /// Hold the reply back for `delay`.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Default)]
struct ServerState {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<ScriptedResponse>>,
}

/// In-process stand-in for the OpenMLDB API server.
pub struct FakeApiServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

impl FakeApiServer {
    /// Start serving `POST /dbs/{db}` on 127.0.0.1 with an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(ServerState::default());
        let router = Router::new()
            .route("/dbs/{db}", post(handle_query))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// `host:port` to put in connection strings.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Connection string for `database` with optional query options.
    pub fn dsn(&self, database: &str, options: &str) -> String {
        if options.is_empty() {
            format!("openmldb://{}/{}", self.host(), database)
        } else {
            format!("openmldb://{}/{}?{}", self.host(), database, options)
        }
    }

    /// Queue a reply. Replies are consumed in order; an empty queue answers
    /// with [`EMPTY_OK`].
    pub fn respond(&self, response: ScriptedResponse) {
        self.state.responses.lock().unwrap().push_back(response);
    }

    /// Queue a `200 OK` reply with `body`.
    pub fn respond_ok(&self, body: &str) {
        self.respond(ScriptedResponse::ok(body));
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeApiServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_query(
    State(state): State<Arc<ServerState>>,
    Path(database): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest { database, body });

    let scripted = state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| ScriptedResponse::ok(EMPTY_OK));

    if let Some(delay) = scripted.delay {
        tokio::time::sleep(delay).await;
    }

    (
        StatusCode::from_u16(scripted.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        scripted.body,
    )
}

// ============================================================================
// Live API server helpers
// ============================================================================

/// Get the API server address from environment or use default.
pub fn get_apiserver() -> String {
    env::var(ENV_APISERVER).unwrap_or_else(|_| DEFAULT_APISERVER.to_string())
}

/// Get the database name from environment or use default.
pub fn get_database() -> String {
    env::var(ENV_DATABASE).unwrap_or_else(|_| DEFAULT_DATABASE.to_string())
}

/// Connection string for the live API server.
pub fn get_test_connection_string() -> String {
    format!("openmldb://{}/{}", get_apiserver(), get_database())
}

/// Check if something accepts TCP connections at the configured address.
pub fn is_apiserver_available() -> bool {
    let socket_addrs: Vec<_> = match get_apiserver().to_socket_addrs() {
        Ok(addrs) => addrs.collect(),
        Err(_) => return false,
    };

    socket_addrs
        .iter()
        .any(|addr| TcpStream::connect_timeout(addr, Duration::from_secs(2)).is_ok())
}

/// Skip a test if the live API server is not reachable.
#[macro_export]
macro_rules! skip_if_no_apiserver {
    () => {
        if !$crate::common::is_apiserver_available() {
            eprintln!(
                "Skipping test: API server not available at {}",
                $crate::common::get_apiserver()
            );
            return;
        }
    };
}
