//! Parse commands - turn the current document into a requirement tree

use anyhow::Context as _;

use docreview::api::parse_id_from;
use docreview::output::PayloadResult;
use docreview::router::Step;

use super::{Context, id_or_stored};

/// Parse the current document and store the parse id
pub async fn parse(ctx: &mut Context) -> anyhow::Result<()> {
    let params = ctx.enter(Step::Parse)?;
    let document_id = params.document_id.context("no document stored")?;

    let payload = ctx.client()?.parse_document(&document_id).await?;

    // Backends that scope parse results to the document return no separate id
    let parse_id = parse_id_from(&payload).unwrap_or_else(|| document_id.clone());
    ctx.store.set_parse_id(Some(&parse_id))?;
    log::info!("document {document_id} parsed as {parse_id}");

    PayloadResult {
        label: "Parse result".to_string(),
        id: Some(parse_id),
        payload,
    }
    .render(ctx.mode);
    Ok(())
}

/// Fetch a parse result without changing stored state
pub async fn parse_result(ctx: &mut Context, id: Option<&str>) -> anyhow::Result<()> {
    let id = id_or_stored(id, ctx.store.parse_id(), Step::Parse)?;
    let payload = ctx.client()?.get_parse_result(&id).await?;
    PayloadResult {
        label: "Parse result".to_string(),
        id: Some(id),
        payload,
    }
    .render(ctx.mode);
    Ok(())
}
