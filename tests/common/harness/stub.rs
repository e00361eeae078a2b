//! Local stand-in for the Notion API.
//!
//! Serves canned JSON for the query and block-children endpoints and
//! records every request it receives. Responses are keyed by method, path
//! and pagination cursor.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

type RouteKey = (String, String, Option<String>);

#[derive(Default)]
struct Shared {
    routes: HashMap<RouteKey, (StatusCode, Value)>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<Shared>>;

/// Notion API stub listening on a random local port.
///
/// The server thread lives until the test process exits.
pub struct StubNotion {
    api_url: String,
    shared: SharedState,
}

impl StubNotion {
    pub fn start() -> Self {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub listener");
        listener
            .set_nonblocking(true)
            .expect("Failed to make stub listener non-blocking");
        let port = listener
            .local_addr()
            .expect("Failed to read stub address")
            .port();

        let shared = SharedState::default();
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&shared));

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build stub runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("Failed to register stub listener");
                axum::serve(listener, app).await.expect("Stub server failed");
            });
        });

        Self {
            api_url: format!("http://127.0.0.1:{}/v1", port),
            shared,
        }
    }

    /// Base URL to pass as `NOTION_API_URL`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Serves `response` for a database query starting at `cursor`.
    pub fn on_query(&self, database_id: &str, cursor: Option<&str>, response: Value) {
        self.route(
            Method::POST,
            &format!("/v1/databases/{}/query", database_id),
            cursor,
            StatusCode::OK,
            response,
        );
    }

    /// Serves `response` for a page's children starting at `cursor`.
    pub fn on_blocks(&self, page_id: &str, cursor: Option<&str>, response: Value) {
        self.route(
            Method::GET,
            &format!("/v1/blocks/{}/children", page_id),
            cursor,
            StatusCode::OK,
            response,
        );
    }

    /// Answers a page's first children request with a Notion error object.
    pub fn fail_blocks(&self, page_id: &str, status: StatusCode) {
        let body = json!({
            "object": "error",
            "status": status.as_u16(),
            "code": "internal_server_error",
            "message": "Something went wrong."
        });
        self.route(
            Method::GET,
            &format!("/v1/blocks/{}/children", page_id),
            None,
            status,
            body,
        );
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests whose path equals `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    fn route(
        &self,
        method: Method,
        path: &str,
        cursor: Option<&str>,
        status: StatusCode,
        body: Value,
    ) {
        let key = (
            method.to_string(),
            path.to_string(),
            cursor.map(str::to_string),
        );
        self.lock().routes.insert(key, (status, body));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        self.shared.lock().expect("Stub state poisoned")
    }
}

async fn handle(
    State(shared): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    let cursor = request_cursor(&method, &uri, &body);
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect(),
        body,
    };

    let key = (request.method.clone(), request.path.clone(), cursor);
    let mut shared = shared.lock().expect("Stub state poisoned");
    shared.requests.push(request);
    match shared.routes.get(&key) {
        Some((status, body)) => (*status, Json(body.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "object": "error",
                "status": 404,
                "code": "object_not_found",
                "message": format!("no stub for {} {}", key.0, key.1)
            })),
        ),
    }
}

/// Cursor from a POST body's `start_cursor`, or from the query string.
fn request_cursor(method: &Method, uri: &Uri, body: &str) -> Option<String> {
    if *method == Method::POST {
        let body: Value = serde_json::from_str(body).ok()?;
        body.get("start_cursor")?.as_str().map(str::to_string)
    } else {
        uri.query()?
            .split('&')
            .find_map(|pair| pair.strip_prefix("start_cursor="))
            .map(str::to_string)
    }
}
