//! Platform-specific path utilities.

use crate::config::PathsConfig;
use crate::error::{Result, WebdockError};
use std::path::{Path, PathBuf};

/// Get the user's applications directory.
///
/// `$XDG_DATA_HOME/applications`, falling back to
/// `~/.local/share/applications` (the `dirs` crate handles the lookup).
pub fn apps_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| WebdockError::Config {
        message: "Could not determine the user data directory".to_string(),
    })?;
    Ok(data_dir.join("applications"))
}

/// Icon directory belonging to an applications directory.
pub fn icons_dir(apps_dir: &Path) -> PathBuf {
    apps_dir.join(PathsConfig::ICONS_DIR_NAME)
}

/// Convert a web app name into a filesystem-safe file stem.
///
/// Case is preserved because names are case-sensitive. Path separators and
/// control characters become `_`; leading dots are dropped so the entry never
/// turns into a hidden file.
pub fn entry_file_stem(name: &str) -> String {
    let safe: String = name
        .trim()
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let safe = safe.trim_start_matches('.');
    if safe.is_empty() {
        "_".to_string()
    } else {
        safe.to_string()
    }
}
