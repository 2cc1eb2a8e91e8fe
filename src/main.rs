//! docreview - A CLI client for the document review workflow
//!
//! Upload a document, have the backend parse and validate it, and export the
//! resulting report, one step at a time.

// Deny all clippy warnings in this crate
#![deny(clippy::all, unsafe_code, unused_import_braces)]
#![warn(clippy::pedantic, missing_debug_implementations)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod cli;

/// Main entry point for the docreview CLI
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
