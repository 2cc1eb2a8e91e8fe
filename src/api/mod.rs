//! Client for the document review backend
//!
//! One function per endpoint. Payloads are passed through as JSON values;
//! only the identifiers the workflow threads between steps are extracted.
//!
//! - [`client`] - HTTP transport and endpoint functions
//! - [`types`] - Request/response helpers and endpoint revisions
//! - [`error`] - Error types with status classification

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use types::{
    ApiRevision, Document, ExportFormat, Report, ReviewOptions, parse_id_from,
    parse_review_option, review_id_from, review_request_body,
};
