//! File permission handling for entry files and browser executables.

use crate::error::{Result, WebdockError};
use std::path::Path;
use tracing::debug;

/// Make a file executable (mode 0o755).
///
/// Several desktop shells refuse to launch entries that are not marked
/// executable.
pub fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(path).map_err(|e| WebdockError::io_with_path(e, path))?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(path, permissions)
            .map_err(|e| WebdockError::io_with_path(e, path))?;
        debug!("Set executable permissions on: {}", path.display());
    }

    #[cfg(not(unix))]
    {
        debug!("Skipping executable bit for: {}", path.display());
    }

    Ok(())
}

/// Check if a path is a regular file with an executable bit set.
pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_set_executable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entry.desktop");
        fs::write(&path, "[Desktop Entry]\n").unwrap();

        assert!(!is_executable(&path));
        set_executable(&path).unwrap();
        assert!(is_executable(&path));
    }

    #[test]
    fn test_is_executable_rejects_directories_and_missing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!is_executable(temp_dir.path()));
        assert!(!is_executable(&temp_dir.path().join("missing")));
    }

    #[test]
    fn test_set_executable_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = set_executable(&temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, WebdockError::Io { path: Some(_), .. }));
    }
}
