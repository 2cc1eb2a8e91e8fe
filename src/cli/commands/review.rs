//! Review commands - validate the current parse result

use anyhow::Context as _;

use docreview::api::{ReviewOptions, review_id_from};
use docreview::output::PayloadResult;
use docreview::router::Step;

use super::{Context, id_or_stored};

/// Validate the current parse result and store the review id
pub async fn review(ctx: &mut Context, options: ReviewOptions) -> anyhow::Result<()> {
    let params = ctx.enter(Step::Review)?;
    let parse_id = params.parse_id.context("no parse result stored")?;

    let payload = ctx.client()?.review_document(&parse_id, &options).await?;
    let review_id = review_id_from(&payload).context("validation response carried no review id")?;

    ctx.store.set_review_id(Some(&review_id))?;
    log::info!("parse {parse_id} reviewed as {review_id}");

    PayloadResult {
        label: "Review result".to_string(),
        id: Some(review_id),
        payload,
    }
    .render(ctx.mode);
    Ok(())
}

/// Fetch a review result without changing stored state
pub async fn review_result(ctx: &mut Context, id: Option<&str>) -> anyhow::Result<()> {
    let id = id_or_stored(id, ctx.store.review_id(), Step::Review)?;
    let payload = ctx.client()?.get_review_result(&id).await?;
    PayloadResult {
        label: "Review result".to_string(),
        id: Some(id),
        payload,
    }
    .render(ctx.mode);
    Ok(())
}
