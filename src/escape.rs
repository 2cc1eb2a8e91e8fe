//! Percent-encoding for identifiers placed in URL and route path segments
//!
//! Backend-issued ids are opaque. Anything outside the RFC 3986 unreserved
//! set is escaped, so `/`, `?`, `#` and `:` inside an id stay part of that
//! one segment.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything except `A-Z a-z 0-9 - . _ ~`
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Escape `raw` for use as a single path segment
#[must_use]
pub fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Reverse [`encode_segment`]; invalid UTF-8 is replaced, not rejected
#[must_use]
pub fn decode_segment(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}
