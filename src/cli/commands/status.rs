//! Status command - show overview of stored workflow state

use docreview::output::StatusResult;
use docreview::router::RouteParams;

use super::Context;

/// Show stored ids, preferences and the next step
pub fn status(ctx: &Context) {
    let store = &ctx.store;
    StatusResult {
        document_id: store.document_id().map(String::from),
        document_name: store.document_name().map(String::from),
        parse_id: store.parse_id().map(String::from),
        review_id: store.review_id().map(String::from),
        theme: store.theme().to_string(),
        language: store.language().to_string(),
        next_step: RouteParams::from_store(store).furthest_step(),
    }
    .render(ctx.mode);
}
