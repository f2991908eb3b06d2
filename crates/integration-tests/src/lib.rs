//! Integration test harness for the Saho client crates.
//!
//! [`MockBackend`] runs an axum server on a random local port in place of
//! the remote Saho API. Each test supplies the routes it needs; every
//! request that reaches the server is recorded so tests can assert on
//! paths, headers and bodies afterwards.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p saho-integration-tests
//! ```
//!
//! No network access or external services are needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use saho_client::{ApiClient, ApiError, AuthSession, ClientConfig};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    /// A header value, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.header(header::AUTHORIZATION.as_str())
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// The body parsed as JSON, or `Value::Null` if it is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// The body as (lossy) text, handy for inspecting multipart payloads.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Whether a multipart body contains a part with the given field name.
    #[must_use]
    pub fn has_part(&self, name: &str) -> bool {
        self.text().contains(&format!("name=\"{name}\""))
    }

    /// Decoded query string pairs.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First value of a query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Shared log of recorded requests.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Recorder {
    fn push(&self, request: RecordedRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }

    /// All requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received for `method` and `path`.
    #[must_use]
    pub fn matching(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| &r.method == method && r.path == path)
            .collect()
    }

    /// Number of requests received for `method` and `path`.
    #[must_use]
    pub fn hits(&self, method: &Method, path: &str) -> usize {
        self.matching(method, path).len()
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let Ok(bytes) = to_bytes(body, usize::MAX).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    recorder.push(RecordedRequest {
        method: parts.method.clone(),
        path: parts.uri.path().to_owned(),
        query: parts.uri.query().map(str::to_owned),
        headers: parts.headers.clone(),
        body: bytes.clone(),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// A local stand-in for the Saho API.
///
/// The server task is aborted when the backend is dropped.
pub struct MockBackend {
    base_url: Url,
    recorder: Recorder,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Serve `routes` on `127.0.0.1` with a random port.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start(routes: Router) -> io::Result<Self> {
        let recorder = Recorder::default();
        let app = routes.layer(middleware::from_fn_with_state(recorder.clone(), record));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}")).map_err(io::Error::other)?;
        Ok(Self {
            base_url,
            recorder,
            server,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A fresh, unauthenticated client pointed at this backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the HTTP client cannot be built.
    pub fn client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(&ClientConfig::new(self.base_url.clone()), AuthSession::new())
    }

    #[must_use]
    pub const fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorder.requests()
    }

    #[must_use]
    pub fn matching(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        self.recorder.matching(method, path)
    }

    #[must_use]
    pub fn hits(&self, method: &Method, path: &str) -> usize {
        self.recorder.hits(method, path)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Counts calls to a handler so a route can answer differently over time.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call and return its zero-based index.
    #[must_use]
    pub fn next(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Canned responses
// ============================================================================

/// A JSON response with the given status.
#[must_use]
pub fn json_response(status: StatusCode, body: Value) -> Response {
    (status, axum::Json(body)).into_response()
}

/// The server's error envelope.
#[must_use]
pub fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(status, json!({ "message": message }))
}

/// A login or refresh response carrying `token`.
///
/// Also sets the refresh cookie the real service uses.
#[must_use]
pub fn token_response(token: &str) -> Response {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, "refresh_token=rt-1; Path=/; HttpOnly")],
        axum::Json(json!({ "accessToken": token })),
    )
        .into_response()
}

// ============================================================================
// Fixtures
// ============================================================================

pub mod fixtures {
    use serde_json::{Value, json};

    const TIMESTAMP: &str = "2024-06-01T10:00:00Z";

    #[must_use]
    pub fn product(id: &str, name: &str, price: u64) -> Value {
        json!({
            "id": id,
            "name": name,
            "price": price,
            "quantity": 4,
            "imageUrls": [format!("https://cdn.example/{id}.jpg")],
            "isTrending": false,
            "isDisabled": false,
            "colors": ["Naturel", "Noyer"],
            "categoryIds": ["c-salon"],
            "description": "Pièce artisanale",
        })
    }

    #[must_use]
    pub fn category(id: &str, slug: &str, name: &str) -> Value {
        json!({ "id": id, "slug": slug, "name": name, "isActive": true })
    }

    #[must_use]
    pub fn page(items: Vec<Value>, page: u32, limit: u32, total: u64) -> Value {
        json!({ "items": items, "page": page, "limit": limit, "total": total })
    }

    #[must_use]
    pub fn quote_request(id: &str, status: &str) -> Value {
        json!({
            "id": id,
            "fullName": "Awa Diop",
            "email": "awa@example.sn",
            "items": [{ "productId": "p1", "quantity": 2 }],
            "status": status,
            "notes": [],
            "createdAt": TIMESTAMP,
            "updatedAt": TIMESTAMP,
        })
    }

    #[must_use]
    pub fn product_request(id: &str, status: &str) -> Value {
        json!({
            "id": id,
            "fullName": "Moussa Ba",
            "email": "moussa@example.sn",
            "description": "Tables de terrasse en teck",
            "status": status,
            "notes": [],
            "createdAt": TIMESTAMP,
            "updatedAt": TIMESTAMP,
        })
    }

    #[must_use]
    pub fn admin_user(id: &str, email: &str) -> Value {
        json!({
            "id": id,
            "email": email,
            "role": "ADMIN",
            "isActive": true,
            "createdAt": TIMESTAMP,
            "updatedAt": TIMESTAMP,
        })
    }
}
