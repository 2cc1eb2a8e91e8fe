//! Centralized path definitions for docreview
//!
//! All on-disk state lives under one directory:
//!
//! ```text
//! ~/.docreview/
//! ├── config.toml      # API endpoint, timeout, guard settings
//! └── storage.json     # Persisted workflow ids and preferences
//! ```
//!
//! Setting `DOCREVIEW_HOME` relocates the whole directory, which is what the
//! CLI tests rely on.

use std::path::PathBuf;

/// Environment variable that overrides the state directory
pub const HOME_ENV: &str = "DOCREVIEW_HOME";

/// Default state directory name under the user's home
const STATE_DIR: &str = ".docreview";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Key/value storage filename
const STORAGE_FILE: &str = "storage.json";

/// Get the docreview state directory.
///
/// Returns `$DOCREVIEW_HOME` when set, otherwise `~/.docreview/`.
#[must_use]
pub fn state_dir() -> PathBuf {
    match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(STATE_DIR),
    }
}

/// Get the config file path.
#[must_use]
pub fn config_file() -> PathBuf {
    state_dir().join(CONFIG_FILE)
}

/// Get the persisted key/value storage path.
///
/// Plays the role browser local storage plays for a web client.
#[must_use]
pub fn storage_file() -> PathBuf {
    state_dir().join(STORAGE_FILE)
}
