//! Reset command - clear stored workflow state

use docreview::output::OperationResult;

use super::Context;

/// Clear the current document (and its dependents), or everything
pub fn reset(ctx: &mut Context, all: bool) -> anyhow::Result<()> {
    let message = if all {
        ctx.store.clear_all()?;
        "Cleared all stored state."
    } else {
        ctx.store.clear_document()?;
        "Cleared document, parse and review ids."
    };
    OperationResult::ok(message).render(ctx.mode);
    Ok(())
}
