//! Set command - persist display preferences

use std::str::FromStr;

use docreview::output::OperationResult;

use super::Context;

/// A persisted preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// UI theme
    Theme,
    /// UI language
    Language,
}

impl FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "theme" => Ok(Self::Theme),
            "language" | "lang" => Ok(Self::Language),
            _ => Err(format!("Unknown preference: {s}. Use 'theme' or 'language'")),
        }
    }
}

/// Store `value` for `key`
pub fn set(ctx: &mut Context, key: Preference, value: &str) -> anyhow::Result<()> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("value must not be empty");
    }
    match key {
        Preference::Theme => ctx.store.set_theme(value)?,
        Preference::Language => ctx.store.set_language(value)?,
    }
    OperationResult::ok(format!("Set {} to {value}", format!("{key:?}").to_lowercase()))
        .render(ctx.mode);
    Ok(())
}
