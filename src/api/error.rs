//! API error types with HTTP status classification

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong talking to the review backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (connect, timeout, transport)
    #[error("request to {endpoint} failed: {source}")]
    Request {
        /// Endpoint path, e.g. `/upload`
        endpoint: String,
        /// Underlying error
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        /// Endpoint path
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The response body was not the JSON we asked for
    #[error("could not decode response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path
        endpoint: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The document to upload could not be read
    #[error("could not read {}: {source}", path.display())]
    File {
        /// File being uploaded
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status code, when the backend sent one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// 401 from the backend
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// 5xx from the backend
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// The most useful single-line description: the response body when the
    /// backend sent one, otherwise the error message
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Status { body, .. } if !body.trim().is_empty() => body.trim().to_string(),
            _ => self.to_string(),
        }
    }
}
