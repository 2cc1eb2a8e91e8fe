//! Output formatting for human and JSON modes
//!
//! Each command produces one of the result types below and renders it either
//! as readable text or as JSON for scripts.

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::api::Document;
use crate::router::{Navigation, Step};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Snapshot of the stored workflow state
#[derive(Debug, Serialize)]
pub struct StatusResult {
    /// Current document id
    pub document_id: Option<String>,
    /// Current document name
    pub document_name: Option<String>,
    /// Current parse id
    pub parse_id: Option<String>,
    /// Current review id
    pub review_id: Option<String>,
    /// Theme preference
    pub theme: String,
    /// Language preference
    pub language: String,
    /// Furthest step the stored ids allow
    pub next_step: Step,
}

impl StatusResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let show = |value: Option<&String>| {
            value.map_or_else(|| "-".dimmed().to_string(), |v| v.as_str().bold().to_string())
        };

        println!("Document: {}", show(self.document_id.as_ref()));
        if let Some(name) = &self.document_name {
            println!("  Name:   {name}");
        }
        println!("Parse:    {}", show(self.parse_id.as_ref()));
        println!("Review:   {}", show(self.review_id.as_ref()));
        println!();

        for step in Step::ALL {
            let marker = if step == self.next_step {
                "→".green().bold().to_string()
            } else if step < self.next_step {
                "✓".green().to_string()
            } else {
                " ".to_string()
            };
            println!("  {marker} {}. {}", step.index() + 1, step.title());
        }
        println!();
        println!("Theme: {}  Language: {}", self.theme, self.language);
    }
}

/// Outcome of a `goto`
#[derive(Debug, Serialize)]
pub struct NavigationResult {
    /// Step that was asked for
    pub requested: Step,
    /// Step actually entered
    pub step: Step,
    /// Concrete path of the entered step, when all its ids are known
    pub path: Option<String>,
    /// Page title of the entered step
    pub title: String,
    /// Whether a guard changed the destination
    pub redirected: bool,
    /// Identifier whose absence caused the redirect
    pub missing: Option<String>,
}

impl NavigationResult {
    /// Summarize a navigation
    #[must_use]
    pub fn from_navigation(requested: Step, navigation: &Navigation) -> Self {
        let route = navigation.route();
        let missing = match navigation {
            Navigation::Redirected { missing, .. } => Some(missing.param().to_string()),
            Navigation::Allowed(_) => None,
        };
        Self {
            requested,
            step: route.step,
            path: route.to_path(),
            title: route.title(),
            redirected: navigation.is_redirect(),
            missing,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if let Some(missing) = &self.missing {
                    println!(
                        "{} {} needs {missing}; redirected to {}",
                        "Redirected:".yellow().bold(),
                        self.requested,
                        self.step
                    );
                }
                println!("{}", self.title.as_str().bold());
                if let Some(path) = &self.path {
                    println!("  {path}");
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// A backend payload shown as-is
#[derive(Debug, Serialize)]
pub struct PayloadResult {
    /// What the payload is, e.g. "parse result"
    pub label: String,
    /// Identifier the payload belongs to
    pub id: Option<String>,
    /// The payload itself
    pub payload: Value,
}

impl PayloadResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                match &self.id {
                    Some(id) => println!("{} {}", format!("{}:", self.label).as_str().bold(), id),
                    None => println!("{}", format!("{}:", self.label).as_str().bold()),
                }
                println!("{}", serde_json::to_string_pretty(&self.payload).unwrap_or_default());
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Documents known to the backend
#[derive(Debug, Serialize)]
pub struct DocumentListResult {
    /// Documents that carried an id
    pub documents: Vec<Document>,
    /// Id of the stored document, if any
    pub current: Option<String>,
}

impl DocumentListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.documents.is_empty() {
                    println!("No documents found.");
                    return;
                }
                println!("Documents:\n");
                for doc in &self.documents {
                    let marker = if self.current.as_deref() == Some(doc.id.as_str()) {
                        "*".green().bold().to_string()
                    } else {
                        " ".to_string()
                    };
                    println!("  {marker} [{}] {}", doc.id, doc.name);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// A successful result
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => print_json(self),
        }
    }
}
