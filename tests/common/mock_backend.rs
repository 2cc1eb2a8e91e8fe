//! A fake review backend
//!
//! Serves canned responses on `127.0.0.1:<random port>/api` and records every
//! request it receives so tests can assert on method, path and body.

use std::io::Cursor;
use std::io::Read as _;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::Value;
use tiny_http::{Header, Response, Server, StatusCode};

/// A request as the backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method, e.g. `POST`
    pub method: String,
    /// Path without the query string, e.g. `/api/parse`
    pub path: String,
    /// Query string, if any
    pub query: Option<String>,
    /// `Content-Type` header
    pub content_type: Option<String>,
    /// Raw body, lossily decoded
    pub body: String,
}

impl RecordedRequest {
    /// Body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

/// One canned endpoint
#[derive(Debug, Clone)]
pub struct MockRoute {
    method: &'static str,
    path: String,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl MockRoute {
    /// Respond to `method path` (path relative to `/api`) with a JSON body
    pub fn json(method: &'static str, path: &str, body: Value) -> Self {
        Self {
            method,
            path: path.to_string(),
            status: 200,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    /// Respond with raw bytes
    pub fn bytes(method: &'static str, path: &str, content_type: &'static str, body: &[u8]) -> Self {
        Self {
            method,
            path: path.to_string(),
            status: 200,
            content_type,
            body: body.to_vec(),
        }
    }

    /// Override the status code
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    fn response(&self) -> Response<Cursor<Vec<u8>>> {
        Response::from_data(self.body.clone())
            .with_header(Header::from_bytes("Content-Type", self.content_type).unwrap())
            .with_status_code(StatusCode(self.status))
    }
}

/// Running fake backend
#[derive(Debug)]
pub struct MockBackend {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    /// Start serving `routes` on a background thread
    pub fn start(routes: Vec<MockRoute>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("failed to bind mock backend");
        let addr = server.server_addr().to_ip().expect("mock backend has no TCP address");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = Vec::new();
                let _ = request.as_reader().read_to_end(&mut body);

                let url = request.url().to_string();
                let (path, query) = match url.split_once('?') {
                    Some((path, query)) => (path.to_string(), Some(query.to_string())),
                    None => (url.clone(), None),
                };
                let method = request.method().to_string();
                let content_type = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string());

                recorded.lock().unwrap().push(RecordedRequest {
                    method: method.clone(),
                    path: path.clone(),
                    query,
                    content_type,
                    body: String::from_utf8_lossy(&body).into_owned(),
                });

                let response = routes
                    .iter()
                    .find(|r| r.method == method && format!("/api{}", r.path) == path)
                    .map_or_else(
                        || {
                            MockRoute::json("GET", "", serde_json::json!({"error": "not found"}))
                                .with_status(404)
                                .response()
                        },
                        MockRoute::response,
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
        }
    }

    /// Base URL to point the client at
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("mock backend received no requests")
    }
}
