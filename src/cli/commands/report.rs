//! Report command - export the current review

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;

use docreview::api::ExportFormat;
use docreview::output::OperationResult;
use docreview::router::Step;

use super::Context;

/// Export the report and write it to `output`
pub async fn report(
    ctx: &mut Context,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let params = ctx.enter(Step::Report)?;
    let review_id = params.review_id.context("no review stored")?;

    let report = ctx.client()?.export_report(&review_id, format).await?;
    let path = output.unwrap_or_else(|| PathBuf::from(report.file_name(&review_id)));
    fs::write(&path, &report.bytes)
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    log::debug!(
        "report content type: {}",
        report.content_type.as_deref().unwrap_or("unknown")
    );
    OperationResult::ok(format!(
        "Saved {} report ({} bytes) to {}",
        report.format,
        report.bytes.len(),
        path.display()
    ))
    .render(ctx.mode);
    Ok(())
}
