//! Goto command - resolve a navigation through the step guards

use anyhow::anyhow;

use docreview::output::NavigationResult;
use docreview::router::{Route, Step};

use super::Context;

/// Navigate to a step name or route path and report where it lands
pub fn goto(ctx: &mut Context, target: &str) -> anyhow::Result<()> {
    let (requested, navigation) = if let Ok(step) = target.parse::<Step>() {
        (step, ctx.router.navigate(step, &mut ctx.store))
    } else {
        let route = Route::parse(target).ok_or_else(|| anyhow!("Unknown step or path: {target}"))?;
        (route.step, ctx.router.navigate_route(&route, &mut ctx.store))
    };

    NavigationResult::from_navigation(requested, &navigation).render(ctx.mode);
    Ok(())
}
