//! API request and response types
//!
//! The backend owns every payload format. Responses are kept as
//! [`serde_json::Value`] and only the identifiers the workflow needs are
//! pulled out of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// ENDPOINT REVISIONS
// =============================================================================

/// Endpoint layout spoken by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiRevision {
    /// `POST /parse`, `POST /validate`, `GET /review/:id/export`
    #[default]
    Current,
    /// `GET /parse/:id`, `GET /validate/:id`, `GET /export/:id`
    Legacy,
}

impl FromStr for ApiRevision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" | "v2" => Ok(Self::Current),
            "legacy" | "v1" => Ok(Self::Legacy),
            _ => Err(format!("Unknown API revision: {s}. Use 'current' or 'legacy'")),
        }
    }
}

// =============================================================================
// DOCUMENTS
// =============================================================================

const DOCUMENT_ID_KEYS: [&str; 3] = ["id", "document_id", "documentId"];
const DOCUMENT_NAME_KEYS: [&str; 4] = ["name", "filename", "document_name", "documentName"];

/// An uploaded document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Backend-issued id
    pub id: String,
    /// Display name
    pub name: String,
    /// Every other field the backend sent (size, status, timestamps...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Pull a document out of an upload or detail response.
    ///
    /// The id may be a string or a number under `id` or `document_id`;
    /// the name comes from `name`, `filename` or `document_name`, falling back
    /// to `fallback_name`. Responses wrapped in `{"data": ...}` are unwrapped.
    #[must_use]
    pub fn from_value(value: &Value, fallback_name: &str) -> Option<Self> {
        let value = unwrap_data(value);
        let id = id_field(value, &DOCUMENT_ID_KEYS)?;
        let name = id_field(value, &DOCUMENT_NAME_KEYS)
            .unwrap_or_else(|| fallback_name.to_string());
        let extra = value
            .as_object()
            .map(|map| {
                map.iter()
                    .filter(|(key, _)| {
                        !DOCUMENT_ID_KEYS.contains(&key.as_str())
                            && !DOCUMENT_NAME_KEYS.contains(&key.as_str())
                    })
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Some(Self { id, name, extra })
    }

    /// Pull a list of documents out of a listing response.
    ///
    /// Accepts a bare array or an object with a `documents`, `data` or `items`
    /// array. Entries without an id are skipped.
    #[must_use]
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        let items = match value {
            Value::Array(items) => Some(items),
            Value::Object(map) => ["documents", "data", "items"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_array)),
            _ => None,
        };
        items
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| Self::from_value(item, ""))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// =============================================================================
// PARSE / REVIEW
// =============================================================================

/// Parse id from a parse response, if the backend named one
#[must_use]
pub fn parse_id_from(value: &Value) -> Option<String> {
    id_field(unwrap_data(value), &["parse_id", "parseId", "id"])
}

/// Review id from a validation response, if the backend named one
#[must_use]
pub fn review_id_from(value: &Value) -> Option<String> {
    id_field(
        unwrap_data(value),
        &["review_id", "reviewId", "validation_id", "id", "task_id"],
    )
}

/// Extra fields merged into a validation request
pub type ReviewOptions = Map<String, Value>;

/// Build the `POST /validate` body: `doc_id` first, then `options` on top
#[must_use]
pub fn review_request_body(parse_id: &str, options: &ReviewOptions) -> Value {
    let mut body = Map::new();
    body.insert("doc_id".to_string(), Value::String(parse_id.to_string()));
    for (key, value) in options {
        body.insert(key.clone(), value.clone());
    }
    Value::Object(body)
}

/// Parse a `key=value` review option.
///
/// The value is read as JSON when it parses (numbers, booleans, arrays),
/// otherwise kept as a plain string.
pub fn parse_review_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Invalid option '{raw}'. Expected key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Invalid option '{raw}'. Key must not be empty"));
    }
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

// =============================================================================
// EXPORT
// =============================================================================

/// Report format requested from the export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PDF document
    #[default]
    Pdf,
    /// Word document
    Docx,
    /// HTML page
    Html,
}

impl ExportFormat {
    /// Query-string value and file extension
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" | "word" => Ok(Self::Docx),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown format: {s}. Use pdf, docx or html")),
        }
    }
}

/// An exported report, passed through untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Format that was requested
    pub format: ExportFormat,
    /// `Content-Type` the backend answered with
    pub content_type: Option<String>,
    /// Raw body
    pub bytes: Vec<u8>,
}

impl Report {
    /// Default file name for saving the report.
    ///
    /// Characters outside `[A-Za-z0-9._-]` in `review_id` become `_`, so the
    /// name never leaves the current directory.
    #[must_use]
    pub fn file_name(&self, review_id: &str) -> String {
        let safe: String = review_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
            .collect();
        format!("report-{safe}.{}", self.format)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn unwrap_data(value: &Value) -> &Value {
    match value.get("data") {
        Some(inner @ Value::Object(_)) => inner,
        _ => value,
    }
}

/// First non-empty string or number found under `keys`
fn id_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
