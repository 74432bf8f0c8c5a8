//! Atomic file writes.
//!
//! Implements atomic writes using:
//! 1. Write to a temp file in the destination directory
//! 2. fsync to ensure data reaches disk
//! 3. Optional permission change on the staged file
//! 4. Atomic rename to target path
//!
//! Readers therefore see either the previous file or the new one, never a
//! partial write.

use crate::config::PathsConfig;
use crate::error::{Result, WebdockError};
use crate::platform::set_executable;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A fully written temp file waiting to be renamed onto its target.
///
/// Dropping it without calling [`StagedFile::commit`] deletes the temp file
/// and leaves the target untouched.
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Write `contents` next to `path` without touching `path` itself.
    ///
    /// When `executable` is set the staged file is given mode 0o755.
    pub fn stage(path: &Path, contents: &[u8], executable: bool) -> Result<Self> {
        let parent = path.parent().ok_or_else(|| WebdockError::Io {
            message: "target has no parent directory".to_string(),
            path: Some(path.to_path_buf()),
            source: None,
        })?;

        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WebdockError::Io {
                message: format!("Failed to create directory {}", parent.display()),
                path: Some(parent.to_path_buf()),
                source: Some(e),
            })?;
        }

        let mut temp = tempfile::Builder::new()
            .prefix(PathsConfig::TEMP_PREFIX)
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(|e| WebdockError::Io {
                message: format!("Failed to create temp file in {}", parent.display()),
                path: Some(parent.to_path_buf()),
                source: Some(e),
            })?;

        write_staged(&mut temp, contents)?;

        if executable {
            set_executable(temp.path())?;
        }

        Ok(Self {
            temp,
            target: path.to_path_buf(),
        })
    }

    /// Final location of the file.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Atomically rename the staged file onto its target.
    pub fn commit(self) -> Result<()> {
        let target = self.target;
        self.temp.persist(&target).map_err(|e| WebdockError::Io {
            message: format!(
                "Failed to rename {} to {}",
                e.file.path().display(),
                target.display()
            ),
            path: Some(target.clone()),
            source: Some(e.error),
        })?;

        debug!("Atomically wrote {}", target.display());
        Ok(())
    }
}

/// Write `contents` to `path` atomically.
///
/// When `executable` is set the file is given mode 0o755 before it becomes
/// visible under its final name.
pub fn atomic_write(path: &Path, contents: &[u8], executable: bool) -> Result<()> {
    StagedFile::stage(path, contents, executable)?.commit()
}

fn write_staged(temp: &mut NamedTempFile, contents: &[u8]) -> Result<()> {
    let staged = temp.path().to_path_buf();
    let file = temp.as_file_mut();

    file.write_all(contents)
        .and_then(|()| file.flush())
        .and_then(|()| file.sync_all())
        .map_err(|e| WebdockError::Io {
            message: format!("Failed to write temp file {}", staged.display()),
            path: Some(staged),
            source: Some(e),
        })
}

/// Remove a file, treating "already gone" as success.
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(WebdockError::io_with_path(e, path)),
    }
}
