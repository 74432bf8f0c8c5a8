//! Browser resolution.
//!
//! Only Chromium-based browsers are supported: they all understand
//! `--app=<url>`, which opens a window without browser chrome.

use crate::error::{Result, WebdockError};
use crate::models::Selection;
use crate::platform::is_executable;
use std::path::PathBuf;
use tracing::debug;

/// Supported browser identifiers, in order of preference.
pub const SUPPORTED_BROWSERS: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "brave-browser",
    "brave",
    "microsoft-edge",
    "microsoft-edge-stable",
];

/// An installed browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBrowser {
    /// Identifier written into the entry's Exec line.
    pub name: String,
    /// Where the executable was found.
    pub path: PathBuf,
}

/// Finds supported browsers on a search path.
#[derive(Debug, Clone)]
pub struct BrowserResolver {
    search_path: Vec<PathBuf>,
}

impl BrowserResolver {
    /// Create a resolver over an explicit list of directories.
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }

    /// Create a resolver over the directories in `$PATH`.
    pub fn from_env() -> Self {
        let search_path = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default();
        Self::new(search_path)
    }

    /// Check whether `name` is a supported browser identifier.
    pub fn is_supported(name: &str) -> bool {
        SUPPORTED_BROWSERS.contains(&name)
    }

    /// Locate an executable named `name` on the search path.
    pub fn find_executable(&self, name: &str) -> Option<PathBuf> {
        self.search_path
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }

    /// Resolve a browser selection to an installed browser.
    pub fn resolve(&self, selection: &Selection<String>) -> Result<ResolvedBrowser> {
        match selection {
            Selection::Explicit(name) => {
                if !Self::is_supported(name) {
                    return Err(WebdockError::UnsupportedBrowser {
                        name: name.clone(),
                        supported: supported_list(),
                    });
                }
                let path = self
                    .find_executable(name)
                    .ok_or_else(|| WebdockError::BrowserNotFound { name: name.clone() })?;
                debug!("Using requested browser {} at {}", name, path.display());
                Ok(ResolvedBrowser {
                    name: name.clone(),
                    path,
                })
            }
            Selection::Auto => SUPPORTED_BROWSERS
                .iter()
                .find_map(|name| {
                    self.find_executable(name).map(|path| ResolvedBrowser {
                        name: (*name).to_string(),
                        path,
                    })
                })
                .inspect(|browser| {
                    debug!(
                        "Auto-detected browser {} at {}",
                        browser.name,
                        browser.path.display()
                    )
                })
                .ok_or_else(|| WebdockError::NoBrowserFound {
                    supported: supported_list(),
                }),
        }
    }
}

fn supported_list() -> Vec<String> {
    SUPPORTED_BROWSERS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::set_executable;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn install(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        set_executable(&path).unwrap();
        path
    }

    #[test]
    fn test_auto_prefers_chromium_family() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path(), "brave");
        let chromium = install(temp_dir.path(), "chromium-browser");

        let resolver = BrowserResolver::new(vec![temp_dir.path().to_path_buf()]);
        let browser = resolver.resolve(&Selection::Auto).unwrap();

        assert_eq!(browser.name, "chromium-browser");
        assert_eq!(browser.path, chromium);
    }

    #[test]
    fn test_auto_searches_every_directory() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        install(second.path(), "microsoft-edge-stable");

        let resolver = BrowserResolver::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        let browser = resolver.resolve(&Selection::Auto).unwrap();
        assert_eq!(browser.name, "microsoft-edge-stable");
    }

    #[test]
    fn test_auto_with_nothing_installed() {
        let temp_dir = TempDir::new().unwrap();
        // Present but not executable.
        fs::write(temp_dir.path().join("chromium"), "").unwrap();

        let resolver = BrowserResolver::new(vec![temp_dir.path().to_path_buf()]);
        let err = resolver.resolve(&Selection::Auto).unwrap_err();
        assert!(matches!(err, WebdockError::NoBrowserFound { .. }));
    }

    #[test]
    fn test_explicit_unsupported() {
        let resolver = BrowserResolver::new(Vec::new());
        let err = resolver
            .resolve(&Selection::Explicit("made-up-browser".to_string()))
            .unwrap_err();
        assert!(matches!(err, WebdockError::UnsupportedBrowser { ref name, .. } if name == "made-up-browser"));
    }

    #[test]
    fn test_explicit_supported_but_missing() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path(), "chromium");

        let resolver = BrowserResolver::new(vec![temp_dir.path().to_path_buf()]);
        let err = resolver
            .resolve(&Selection::Explicit("brave".to_string()))
            .unwrap_err();
        assert!(matches!(err, WebdockError::BrowserNotFound { ref name } if name == "brave"));
    }

    #[test]
    fn test_explicit_found() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path(), "chromium");
        install(temp_dir.path(), "google-chrome");

        let resolver = BrowserResolver::new(vec![temp_dir.path().to_path_buf()]);
        let browser = resolver
            .resolve(&Selection::Explicit("google-chrome".to_string()))
            .unwrap();
        assert_eq!(browser.name, "google-chrome");
    }
}
