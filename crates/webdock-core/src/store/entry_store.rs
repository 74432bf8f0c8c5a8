//! The on-disk web app store.
//!
//! The applications directory is the registry: there is no index file, and
//! every query rescans the directory. A file counts as a web app when it is a
//! `.desktop` application entry whose `Exec` launches a browser with `--app=`.

use super::atomic::{atomic_write, remove_if_exists, StagedFile};
use super::desktop_entry::DesktopEntry;
use crate::config::PathsConfig;
use crate::error::{Result, WebdockError};
use crate::models::{IconImage, WebApp, WebAppSummary};
use crate::network::load_icon_file;
use crate::platform::{entry_file_stem, icons_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A web app together with the entry file it was read from.
#[derive(Debug, Clone)]
struct StoredApp {
    entry_path: PathBuf,
    app: WebApp,
}

/// Reads and writes web app entry files and their icons.
#[derive(Debug, Clone)]
pub struct EntryStore {
    /// Applications directory (~/.local/share/applications).
    apps_dir: PathBuf,
    /// Icons directory (<apps_dir>/icons).
    icons_dir: PathBuf,
}

impl EntryStore {
    /// Create a store rooted at an applications directory.
    ///
    /// Nothing is created on disk until the first write.
    pub fn new(apps_dir: impl AsRef<Path>) -> Self {
        let apps_dir = apps_dir.as_ref().to_path_buf();
        let icons_dir = icons_dir(&apps_dir);
        Self {
            apps_dir,
            icons_dir,
        }
    }

    pub fn apps_dir(&self) -> &Path {
        &self.apps_dir
    }

    pub fn icons_dir(&self) -> &Path {
        &self.icons_dir
    }

    /// Path of the entry file a web app with this name is written to.
    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.apps_dir.join(format!(
            "{}.{}",
            entry_file_stem(name),
            PathsConfig::ENTRY_EXTENSION
        ))
    }

    fn icon_path(&self, name: &str, extension: &str) -> PathBuf {
        self.icons_dir
            .join(format!("{}.{}", entry_file_stem(name), extension))
    }

    /// Whether an icon path lives in this store's icon directory.
    fn owns_icon(&self, path: &Path) -> bool {
        path.starts_with(&self.icons_dir)
    }

    fn scan(&self) -> Result<Vec<StoredApp>> {
        let read_dir = match fs::read_dir(&self.apps_dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(WebdockError::io_with_path(e, &self.apps_dir)),
        };

        let mut apps = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| WebdockError::io_with_path(e, &self.apps_dir))?;
            let path = dir_entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some(PathsConfig::ENTRY_EXTENSION) {
                continue;
            }

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    debug!("Skipping unreadable entry {}: {}", path.display(), e);
                    continue;
                }
            };

            if let Some(app) = DesktopEntry::parse(&content).and_then(|e| e.to_webapp()) {
                apps.push(StoredApp {
                    entry_path: path,
                    app,
                });
            }
        }

        Ok(apps)
    }

    fn locate(&self, name: &str) -> Result<Option<StoredApp>> {
        Ok(self.scan()?.into_iter().find(|stored| stored.app.name == name))
    }

    /// List registered web apps in directory order.
    pub fn list(&self) -> Result<Vec<WebAppSummary>> {
        Ok(self
            .scan()?
            .into_iter()
            .map(|stored| WebAppSummary {
                has_icon: stored.app.icon_path.as_ref().is_some_and(|p| p.exists()),
                name: stored.app.name,
                url: stored.app.url,
            })
            .collect())
    }

    /// Look up a web app by its exact name.
    pub fn find(&self, name: &str) -> Result<WebApp> {
        self.locate(name)?
            .map(|stored| stored.app)
            .ok_or_else(|| WebdockError::NotFound {
                name: name.to_string(),
            })
    }

    /// Whether a web app with this exact name is registered.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.locate(name)?.is_some())
    }

    /// Whether `name` is registered or its entry file path is already in use.
    pub fn is_taken(&self, name: &str) -> Result<bool> {
        Ok(self.contains(name)? || self.entry_path(name).exists())
    }

    /// Write a new web app's entry file, storing `icon` alongside it.
    ///
    /// Returns the web app as persisted (with its final icon path).
    pub fn write(&self, app: WebApp, icon: Option<&IconImage>) -> Result<WebApp> {
        let entry_path = self.entry_path(&app.name);
        self.write_to(&entry_path, app, icon)
    }

    /// Write `app` to `entry_path`.
    ///
    /// The icon is staged first and only renamed into place once the entry
    /// is written, so a failed entry write leaves any existing icon intact.
    /// An icon superseded by a new one is removed afterwards.
    fn write_to(
        &self,
        entry_path: &Path,
        app: WebApp,
        icon: Option<&IconImage>,
    ) -> Result<WebApp> {
        let mut app = app;
        let previous_icon = app.icon_path.clone();

        let staged_icon = match icon {
            Some(icon) => {
                let path = self.icon_path(&app.name, icon.extension);
                let staged = StagedFile::stage(&path, &icon.bytes, false)?;
                app.icon_path = Some(path);
                Some(staged)
            }
            None => None,
        };

        let content = DesktopEntry::for_webapp(&app).to_string();
        atomic_write(entry_path, content.as_bytes(), true)?;

        if let Some(staged) = staged_icon {
            staged.commit()?;
        }

        if let Some(old) = previous_icon {
            if Some(&old) != app.icon_path.as_ref() && self.owns_icon(&old) {
                self.discard_icon(&old);
            }
        }

        debug!("Wrote web app {} to {}", app.name, entry_path.display());
        Ok(app)
    }

    /// Best-effort removal of an icon nothing refers to any more.
    fn discard_icon(&self, path: &Path) {
        if let Err(e) = remove_if_exists(path) {
            warn!("Failed to remove old icon {}: {}", path.display(), e);
        }
    }

    /// Delete a web app's entry file and icon.
    ///
    /// A missing icon is logged and otherwise ignored.
    pub fn delete(&self, name: &str) -> Result<()> {
        let stored = self.locate(name)?.ok_or_else(|| WebdockError::NotFound {
            name: name.to_string(),
        })?;

        match stored.app.icon_path {
            Some(ref icon) if self.owns_icon(icon) => {
                if !remove_if_exists(icon)? {
                    warn!("Icon for web app '{}' not found at {}", name, icon.display());
                }
            }
            _ => debug!("Web app '{}' has no icon of its own", name),
        }

        fs::remove_file(&stored.entry_path)
            .map_err(|e| WebdockError::io_with_path(e, &stored.entry_path))?;

        debug!("Deleted web app {} ({})", name, stored.entry_path.display());
        Ok(())
    }

    /// Replace the web app registered as `name` with `updated`.
    ///
    /// When the name is unchanged the entry is rewritten in the file it was
    /// read from, whatever that file is called. When the name changes the new
    /// entry is written under the new name before the old file is removed,
    /// so a failure part-way never loses the web app. The old icon is carried
    /// over under the new name unless `icon` replaces it.
    pub fn replace(
        &self,
        name: &str,
        updated: WebApp,
        icon: Option<&IconImage>,
    ) -> Result<WebApp> {
        let stored = self.locate(name)?.ok_or_else(|| WebdockError::NotFound {
            name: name.to_string(),
        })?;

        if updated.name == stored.app.name {
            return self.write_to(&stored.entry_path, updated, icon);
        }

        if self.contains(&updated.name)? {
            return Err(WebdockError::DuplicateName {
                name: updated.name,
            });
        }

        let new_entry_path = self.entry_path(&updated.name);
        if new_entry_path != stored.entry_path && new_entry_path.exists() {
            // Another file already uses the stem the new name maps to.
            return Err(WebdockError::DuplicateName {
                name: updated.name,
            });
        }

        let old_icon = stored
            .app
            .icon_path
            .clone()
            .filter(|p| self.owns_icon(p) && p.exists());

        let carried = match (icon, &old_icon) {
            (None, Some(path)) => match load_icon_file(path, usize::MAX) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Keeping icon {} in place: {}", path.display(), e);
                    None
                }
            },
            _ => None,
        };

        let mut updated = updated;
        let new_icon = icon.or(carried.as_ref());
        if new_icon.is_some() {
            updated.icon_path = None;
        }

        let written = self.write_to(&new_entry_path, updated, new_icon)?;

        if stored.entry_path != new_entry_path {
            fs::remove_file(&stored.entry_path)
                .map_err(|e| WebdockError::io_with_path(e, &stored.entry_path))?;
        }

        if let Some(path) = old_icon {
            if new_icon.is_some() && written.icon_path.as_ref() != Some(&path) {
                self.discard_icon(&path);
            }
        }

        debug!("Renamed web app {} to {}", name, written.name);
        Ok(written)
    }
}
