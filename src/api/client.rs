//! HTTP client for the review backend
//!
//! Every call goes through [`ApiClient::send`], which prefixes the base URL,
//! applies the timeout and JSON headers, unwraps successful responses, and
//! logs failures before handing them back unchanged. There is no retry.
//! Ids are always escaped as single path segments.

use std::path::Path;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde_json::Value;

use super::error::ApiError;
use super::types::{ApiRevision, ExportFormat, Report, ReviewOptions, review_request_body};
use crate::escape::encode_segment;

/// Base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Request timeout used when nothing is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Prefix for every endpoint, e.g. `http://localhost:5000/api`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Endpoint layout
    pub revision: ApiRevision,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            revision: ApiRevision::default(),
        }
    }
}

/// Review backend client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    revision: ApiRevision,
}

impl ApiClient {
    /// Build a client from connection settings
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            revision: config.revision,
        })
    }

    /// Endpoint layout in use
    #[must_use]
    pub const fn revision(&self) -> ApiRevision {
        self.revision
    }

    /// Absolute URL for an endpoint path
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    // =========================================================================
    // DOCUMENTS
    // =========================================================================

    /// Upload a document as `multipart/form-data` (field `file`).
    ///
    /// Returns the backend's response, which carries the new document's id
    /// and name.
    pub async fn upload_document(&self, path: &Path) -> Result<Value, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| {
            failed(ApiError::File {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "document".to_string(), |n| n.to_string_lossy().into_owned());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let endpoint = "/upload";
        let request = self.http.post(self.url(endpoint)).multipart(form);
        self.send_json(endpoint, request).await
    }

    /// List documents known to the backend
    pub async fn get_documents(&self) -> Result<Value, ApiError> {
        self.get_json("/documents").await
    }

    /// Fetch one document's details
    pub async fn get_document_detail(&self, id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/documents/{}", encode_segment(id))).await
    }

    // =========================================================================
    // PARSE
    // =========================================================================

    /// Ask the backend to parse a document into a requirement tree
    pub async fn parse_document(&self, document_id: &str) -> Result<Value, ApiError> {
        match self.revision {
            ApiRevision::Current => {
                let body = serde_json::json!({ "document_id": document_id });
                self.post_json("/parse", &body).await
            },
            ApiRevision::Legacy => {
                self.get_json(&format!("/parse/{}", encode_segment(document_id))).await
            },
        }
    }

    /// Fetch a parse result
    pub async fn get_parse_result(&self, parse_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/parse/{}", encode_segment(parse_id))).await
    }

    // =========================================================================
    // REVIEW
    // =========================================================================

    /// Run validation against a parse result.
    ///
    /// The legacy layout has no request body, so `options` are dropped there.
    pub async fn review_document(
        &self,
        parse_id: &str,
        options: &ReviewOptions,
    ) -> Result<Value, ApiError> {
        match self.revision {
            ApiRevision::Current => {
                self.post_json("/validate", &review_request_body(parse_id, options)).await
            },
            ApiRevision::Legacy => {
                if !options.is_empty() {
                    log::warn!(
                        "legacy validate endpoint takes no options; ignoring {} option(s)",
                        options.len()
                    );
                }
                self.get_json(&format!("/validate/{}", encode_segment(parse_id))).await
            },
        }
    }

    /// Fetch a review result
    pub async fn get_review_result(&self, review_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/validate/{}", encode_segment(review_id))).await
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    /// Export the report for a review in `format`
    pub async fn export_report(
        &self,
        review_id: &str,
        format: ExportFormat,
    ) -> Result<Report, ApiError> {
        let endpoint = match self.revision {
            ApiRevision::Current => format!("/review/{}/export", encode_segment(review_id)),
            ApiRevision::Legacy => format!("/export/{}", encode_segment(review_id)),
        };
        let url = format!("{}?format={format}", self.url(&endpoint));
        let response = self.send(&endpoint, self.http.get(url)).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response.bytes().await.map_err(|source| {
            failed(ApiError::Request {
                endpoint: endpoint.clone(),
                source,
            })
        })?;

        Ok(Report {
            format,
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    // =========================================================================
    // TRANSPORT
    // =========================================================================

    async fn get_json(&self, endpoint: &str) -> Result<Value, ApiError> {
        let request = self.http.get(self.url(endpoint));
        self.send_json(endpoint, request).await
    }

    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
        let request = self.http.post(self.url(endpoint)).json(body);
        self.send_json(endpoint, request).await
    }

    /// Send and decode the body as JSON; an empty body decodes to `null`
    async fn send_json(&self, endpoint: &str, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = self.send(endpoint, request).await?;
        let bytes = response.bytes().await.map_err(|source| {
            failed(ApiError::Request {
                endpoint: endpoint.to_string(),
                source,
            })
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|source| {
            failed(ApiError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })
        })
    }

    /// Send a request, turning transport failures and non-2xx statuses into
    /// logged errors
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        log::debug!("{} {}", self.revision_label(), self.url(endpoint));

        let response = request.send().await.map_err(|source| {
            failed(ApiError::Request {
                endpoint: endpoint.to_string(),
                source,
            })
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(failed(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        }))
    }

    const fn revision_label(&self) -> &'static str {
        match self.revision {
            ApiRevision::Current => "[current]",
            ApiRevision::Legacy => "[legacy]",
        }
    }
}

fn failed(err: ApiError) -> ApiError {
    log_failure(&err);
    err
}

fn log_failure(err: &ApiError) {
    log::error!("API Error: {}", err.detail());
    if err.is_unauthorized() {
        log::error!("backend rejected the request as unauthorized");
    } else if err.is_server_error() {
        log::error!("backend reported an internal error");
    }
}
