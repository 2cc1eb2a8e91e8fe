//! Document listing and detail commands

use docreview::api::Document;
use docreview::output::{DocumentListResult, PayloadResult};
use docreview::router::Step;

use super::{Context, id_or_stored};

/// List documents on the server, marking the current one
pub async fn documents(ctx: &mut Context) -> anyhow::Result<()> {
    let response = ctx.client()?.get_documents().await?;
    DocumentListResult {
        documents: Document::list_from_value(&response),
        current: ctx.store.document_id().map(String::from),
    }
    .render(ctx.mode);
    Ok(())
}

/// Show one document's details
pub async fn document(ctx: &mut Context, id: Option<&str>) -> anyhow::Result<()> {
    let id = id_or_stored(id, ctx.store.document_id(), Step::Upload)?;
    let payload = ctx.client()?.get_document_detail(&id).await?;
    PayloadResult {
        label: "Document".to_string(),
        id: Some(id),
        payload,
    }
    .render(ctx.mode);
    Ok(())
}
