//! Init command - write a default config file

use std::path::Path;

use docreview::config::AppConfig;
use docreview::output::OperationResult;
use docreview::output::OutputMode;
use docreview::paths;

/// Write the default config to `path` (or the default location)
pub fn init(path: Option<&Path>, force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let path = path.map_or_else(paths::config_file, Path::to_path_buf);

    if path.exists() && !force {
        OperationResult::ok(format!(
            "Already initialized ({} exists).\nUse --force to overwrite.",
            path.display()
        ))
        .render(mode);
        return Ok(());
    }

    AppConfig::default().save_to(&path)?;
    OperationResult::ok(format!("Created {}", path.display())).render(mode);
    Ok(())
}
