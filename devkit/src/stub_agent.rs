/**
 * STUB AGENT - In-process stand-in for the Diffa agent REST API
 *
 * ROLE :
 * Serves the three endpoints the console talks to, on an ephemeral localhost
 * port, from canned fixtures.
 *
 * ROUTES :
 * - POST /rest/diffs/sessions            -> 201 + Location of a new session
 * - GET  /rest/diffs/sessions/{id}/zoom  -> zoom payload (pair key -> counts)
 * - GET  /rest/diffs/sessions/{id}/      -> diff records for ?pairKey
 *
 * Every request is recorded (method, path, query) so tests can assert on
 * exactly what the console sent. Unknown sessions answer 404.
 */

use crate::fixtures::{DiffRecordFixture, ZoomFixture};
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub type Shared<T> = Arc<Mutex<T>>;

/// How the session Location header is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationStyle {
    /// `http://127.0.0.1:port/rest/diffs/sessions/{id}`
    Absolute,
    /// `/rest/diffs/sessions/{id}`
    PathOnly,
    /// no Location header at all
    Missing,
}

#[derive(Debug, Clone)]
pub struct StubAgentConfig {
    pub location: LocationStyle,
    pub zoom: ZoomFixture,
    pub records: Vec<DiffRecordFixture>,
    /// Raw zoom body served instead of `zoom`, for malformed payload tests
    pub zoom_body_override: Option<String>,
    /// Status returned by the data endpoints instead of 200
    pub data_failure: Option<u16>,
}

impl Default for StubAgentConfig {
    fn default() -> Self {
        Self {
            location: LocationStyle::Absolute,
            zoom: ZoomFixture::new(),
            records: Vec::new(),
            zoom_body_override: None,
            data_failure: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
}

struct StubState {
    config: StubAgentConfig,
    base_url: String,
    sessions: Vec<String>,
    requests: Vec<RecordedRequest>,
}

impl StubState {
    fn record(&mut self, method: &str, uri: &axum::http::Uri, query: HashMap<String, String>) {
        log::info!("[stub-agent] {} {}", method, uri);
        self.requests.push(RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            query,
        });
    }

    fn knows(&self, session_id: &str) -> bool {
        self.sessions.iter().any(|s| s == session_id)
    }
}

/// Handle on a running stub; the server task stops when this is dropped
pub struct StubAgent {
    addr: SocketAddr,
    state: Shared<StubState>,
    server: JoinHandle<()>,
}

impl StubAgent {
    pub async fn start(config: StubAgentConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let state = Arc::new(Mutex::new(StubState {
            config,
            base_url: format!("http://{}", addr),
            sessions: Vec::new(),
            requests: Vec::new(),
        }));

        let app = build_router(state.clone());
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                log::error!("[stub-agent] server stopped: {}", e);
            }
        });

        log::info!("[stub-agent] listening on http://{}", addr);
        Ok(Self { addr, state, server })
    }

    /// Base URL to hand to the console, without a trailing slash
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.lock().sessions.len()
    }
}

impl Drop for StubAgent {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn build_router(state: Shared<StubState>) -> Router {
    Router::new()
        .route("/rest/diffs/sessions", post(open_session))
        .route("/rest/diffs/sessions/{id}/zoom", get(zoomed_counts))
        .route("/rest/diffs/sessions/{id}/", get(list_diffs))
        .with_state(state)
}

// POST /rest/diffs/sessions
async fn open_session(State(state): State<Shared<StubState>>, OriginalUri(uri): OriginalUri) -> Response {
    let mut st = state.lock();
    st.record("POST", &uri, HashMap::new());

    let id = Uuid::new_v4().simple().to_string();
    st.sessions.push(id.clone());

    let location = match st.config.location {
        LocationStyle::Absolute => format!("{}/rest/diffs/sessions/{}", st.base_url, id),
        LocationStyle::PathOnly => format!("/rest/diffs/sessions/{}", id),
        LocationStyle::Missing => return StatusCode::CREATED.into_response(),
    };
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}

// GET /rest/diffs/sessions/{id}/zoom
async fn zoomed_counts(
    State(state): State<Shared<StubState>>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut st = state.lock();
    st.record("GET", &uri, params);

    if !st.knows(&id) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Some(status) = st.config.data_failure {
        return failure(status);
    }

    let body = match &st.config.zoom_body_override {
        Some(raw) => raw.clone(),
        None => st.config.zoom.to_json().to_string(),
    };
    json_response(body)
}

// GET /rest/diffs/sessions/{id}/?pairKey=...
async fn list_diffs(
    State(state): State<Shared<StubState>>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let pair_key = params.get("pairKey").cloned();
    let mut st = state.lock();
    st.record("GET", &uri, params);

    if !st.knows(&id) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Some(status) = st.config.data_failure {
        return failure(status);
    }
    let Some(pair_key) = pair_key else {
        return (StatusCode::BAD_REQUEST, "missing pairKey").into_response();
    };

    let records: Vec<Value> = st
        .config
        .records
        .iter()
        .filter(|r| r.pair_key() == pair_key)
        .map(DiffRecordFixture::to_json)
        .collect();
    json_response(Value::Array(records).to_string())
}

fn json_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn failure(status: u16) -> Response {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, "stub agent failure").into_response()
}
