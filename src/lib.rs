//! docreview - A CLI client for the document review workflow
//!
//! Upload a document, have the backend parse it into a requirement tree,
//! validate the tree, and export a report. All of the heavy lifting happens
//! server-side; this library coordinates the identifiers the backend hands
//! out and gates each workflow step on the ones before it.

// Deny all clippy warnings in this crate
#![deny(clippy::all, unsafe_code, unused_import_braces)]
#![warn(
    clippy::pedantic,
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod config;
pub mod escape;
pub mod output;
pub mod paths;
pub mod router;
pub mod storage;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use config::AppConfig;
pub use router::{Navigation, Route, Router, Step};
pub use store::WorkflowStore;
