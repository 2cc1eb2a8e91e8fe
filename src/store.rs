//! Workflow state store
//!
//! Holds the identifiers the backend hands out as the user moves through
//! upload → parse → review → report, plus two display preferences. Every
//! setter writes through to the [`KeyValueStore`] backend.
//!
//! Dependent identifiers are cleared whenever an upstream one changes:
//! a new document drops the parse and review ids, a new parse id drops the
//! review id. A review therefore never outlives its parse result, and a parse
//! result never outlives its document.

use crate::storage::{KeyValueStore, StoreError};

/// Storage key for the current document id
pub const DOCUMENT_ID_KEY: &str = "documentId";
/// Storage key for the current document name
pub const DOCUMENT_NAME_KEY: &str = "documentName";
/// Storage key for the current parse id
pub const PARSE_ID_KEY: &str = "parseId";
/// Storage key for the current review id
pub const REVIEW_ID_KEY: &str = "reviewId";
/// Storage key for the theme preference
pub const THEME_KEY: &str = "theme";
/// Storage key for the language preference
pub const LANGUAGE_KEY: &str = "language";

/// Every key the store may write
pub const PERSISTED_KEYS: [&str; 6] = [
    DOCUMENT_ID_KEY,
    DOCUMENT_NAME_KEY,
    PARSE_ID_KEY,
    REVIEW_ID_KEY,
    THEME_KEY,
    LANGUAGE_KEY,
];

/// Theme used when none is stored
pub const DEFAULT_THEME: &str = "light";
/// Language used when none is stored
pub const DEFAULT_LANGUAGE: &str = "zh-CN";

/// Persisted workflow state
#[derive(Debug)]
pub struct WorkflowStore<S: KeyValueStore> {
    backend: S,
    document_id: Option<String>,
    document_name: Option<String>,
    parse_id: Option<String>,
    review_id: Option<String>,
    theme: String,
    language: String,
    /// Not persisted; reset to 0 on every load
    current_step: usize,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl<S: KeyValueStore> WorkflowStore<S> {
    /// Hydrate the store from `backend`
    pub fn load(backend: S) -> Self {
        Self {
            document_id: non_empty(backend.get_item(DOCUMENT_ID_KEY)),
            document_name: non_empty(backend.get_item(DOCUMENT_NAME_KEY)),
            parse_id: non_empty(backend.get_item(PARSE_ID_KEY)),
            review_id: non_empty(backend.get_item(REVIEW_ID_KEY)),
            theme: non_empty(backend.get_item(THEME_KEY))
                .unwrap_or_else(|| DEFAULT_THEME.to_string()),
            language: non_empty(backend.get_item(LANGUAGE_KEY))
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            current_step: 0,
            backend,
        }
    }

    /// The underlying storage backend
    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Current document id
    #[must_use]
    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// Current document name
    #[must_use]
    pub fn document_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }

    /// Current parse id
    #[must_use]
    pub fn parse_id(&self) -> Option<&str> {
        self.parse_id.as_deref()
    }

    /// Current review id
    #[must_use]
    pub fn review_id(&self) -> Option<&str> {
        self.review_id.as_deref()
    }

    /// Theme preference
    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Language preference
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Index of the step last navigated to
    #[must_use]
    pub const fn current_step(&self) -> usize {
        self.current_step
    }

    /// Whether a document has been uploaded
    #[must_use]
    pub const fn has_document(&self) -> bool {
        self.document_id.is_some()
    }

    /// Whether a parse result is available
    #[must_use]
    pub const fn has_parse(&self) -> bool {
        self.parse_id.is_some()
    }

    /// Whether a review result is available
    #[must_use]
    pub const fn has_review(&self) -> bool {
        self.review_id.is_some()
    }

    /// Replace the current document, dropping its parse and review ids.
    ///
    /// An empty `id` clears the document instead.
    pub fn set_document(&mut self, id: &str, name: &str) -> Result<(), StoreError> {
        if id.is_empty() {
            return self.clear_document();
        }
        self.document_id = Some(id.to_string());
        self.backend.set_item(DOCUMENT_ID_KEY, id)?;
        write_optional(&mut self.backend, &mut self.document_name, DOCUMENT_NAME_KEY, Some(name))?;
        self.set_parse_id(None)
    }

    /// Forget the current document and everything derived from it
    pub fn clear_document(&mut self) -> Result<(), StoreError> {
        write_optional(&mut self.backend, &mut self.document_id, DOCUMENT_ID_KEY, None)?;
        write_optional(&mut self.backend, &mut self.document_name, DOCUMENT_NAME_KEY, None)?;
        self.set_parse_id(None)
    }

    /// Replace or clear the parse id; the review id is always dropped
    pub fn set_parse_id(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        write_optional(&mut self.backend, &mut self.parse_id, PARSE_ID_KEY, id)?;
        self.set_review_id(None)
    }

    /// Replace or clear the review id
    pub fn set_review_id(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        write_optional(&mut self.backend, &mut self.review_id, REVIEW_ID_KEY, id)
    }

    /// Persist the theme preference
    pub fn set_theme(&mut self, theme: &str) -> Result<(), StoreError> {
        self.theme = theme.to_string();
        self.backend.set_item(THEME_KEY, theme)
    }

    /// Persist the language preference
    pub fn set_language(&mut self, language: &str) -> Result<(), StoreError> {
        self.language = language.to_string();
        self.backend.set_item(LANGUAGE_KEY, language)
    }

    /// Record the step last navigated to (in memory only)
    pub const fn set_current_step(&mut self, step: usize) {
        self.current_step = step;
    }

    /// Reset every field to its default and remove every storage entry
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        for key in PERSISTED_KEYS {
            self.backend.remove_item(key)?;
        }
        self.document_id = None;
        self.document_name = None;
        self.parse_id = None;
        self.review_id = None;
        self.theme = DEFAULT_THEME.to_string();
        self.language = DEFAULT_LANGUAGE.to_string();
        self.current_step = 0;
        Ok(())
    }
}

/// Write `value` into both the field and the backend; `None` or empty removes
fn write_optional<S: KeyValueStore>(
    backend: &mut S,
    field: &mut Option<String>,
    key: &str,
    value: Option<&str>,
) -> Result<(), StoreError> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => {
            backend.set_item(key, v)?;
            *field = Some(v.to_string());
        },
        None => {
            backend.remove_item(key)?;
            *field = None;
        },
    }
    Ok(())
}
