//! Upload command - send a document and make it current

use std::path::Path;

use anyhow::Context as _;

use docreview::api::Document;
use docreview::output::{OperationResult, OutputMode, PayloadResult};
use docreview::router::Step;

use super::Context;

/// Upload `file` and store its document id, dropping any earlier parse/review
pub async fn upload(ctx: &mut Context, file: &Path) -> anyhow::Result<()> {
    ctx.enter(Step::Upload)?;

    let client = ctx.client()?;
    let response = client.upload_document(file).await?;

    let fallback = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let document = Document::from_value(&response, &fallback)
        .context("upload response carried no document id")?;

    ctx.store.set_document(&document.id, &document.name)?;
    log::info!("current document is now {} ({})", document.id, document.name);

    match ctx.mode {
        OutputMode::Human => OperationResult::ok(format!(
            "Uploaded {} as document {}\nNext: docreview parse",
            document.name, document.id
        ))
        .render(ctx.mode),
        OutputMode::Json => PayloadResult {
            label: "document".to_string(),
            id: Some(document.id),
            payload: response,
        }
        .render(ctx.mode),
    }
    Ok(())
}
