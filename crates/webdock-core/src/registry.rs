//! High-level web app management.
//!
//! Every command validates and resolves everything it needs before the first
//! write, so a failed command leaves the store exactly as it found it.

use crate::browser::BrowserResolver;
use crate::error::{Result, WebdockError};
use crate::models::{
    IconImage, IconSource, Platform, Selection, WebApp, WebAppSummary, WebAppUpdate,
};
use crate::network::{load_icon_file, FaviconFetcher};
use crate::platform::{self, resolve_platform, DisplayEnv};
use crate::store::EntryStore;
use crate::validate::{validate_name, validate_url};
use std::path::PathBuf;
use tracing::info;

/// Arguments for [`WebAppRegistry::add`].
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub name: String,
    pub url: String,
    /// Icon URL or local image path. `None` triggers a favicon lookup.
    pub icon: Option<String>,
    pub browser: Selection<String>,
    pub platform: Selection<Platform>,
}

/// High-level web app registry.
pub struct WebAppRegistry {
    store: EntryStore,
    browsers: BrowserResolver,
    fetcher: FaviconFetcher,
    display_env: DisplayEnv,
}

impl WebAppRegistry {
    /// Create a registry over the user's applications directory.
    pub fn new() -> Result<Self> {
        Self::builder(platform::apps_dir()?).build()
    }

    /// Start configuring a registry rooted at `apps_dir`.
    pub fn builder(apps_dir: impl Into<PathBuf>) -> WebAppRegistryBuilder {
        WebAppRegistryBuilder::new(apps_dir)
    }

    /// The underlying entry store.
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Register a new web app.
    pub async fn add(&self, request: AddRequest) -> Result<WebApp> {
        let name = validate_name(&request.name)?;
        if self.store.is_taken(&name)? {
            return Err(WebdockError::DuplicateName { name });
        }

        let url = validate_url(&request.url)?;
        let icon_source = request.icon.as_deref().map(IconSource::parse).transpose()?;

        let browser = self.browsers.resolve(&request.browser)?;
        let platform = resolve_platform(&request.platform, &self.display_env);

        let icon = match icon_source {
            Some(source) => Some(self.obtain_icon(&source).await?),
            None => self.fetcher.fetch_favicon(&url).await,
        };

        let app = WebApp {
            name,
            url: url.as_str().to_string(),
            icon_path: None,
            browser_command: browser.name,
            platform: Some(platform),
        };
        let app = self.store.write(app, icon.as_ref())?;

        info!(
            "Created web app '{}' ({}, browser={}, platform={}, icon={})",
            app.name,
            app.url,
            app.browser_command,
            platform,
            if app.icon_path.is_some() { "custom" } else { "default" }
        );
        Ok(app)
    }

    /// Change the url, icon and/or name of an existing web app.
    ///
    /// Fields left unset in `update` keep their current values; the browser
    /// and platform are never changed.
    pub async fn update(&self, name: &str, update: WebAppUpdate) -> Result<WebApp> {
        let current = self.store.find(name)?;
        if update.is_empty() {
            return Err(WebdockError::validation(
                "update",
                "nothing to change (give a new url, icon or name)",
            ));
        }

        let mut updated = current;

        if let Some(ref url) = update.url {
            updated.url = validate_url(url)?.as_str().to_string();
        }

        if let Some(ref new_name) = update.rename {
            updated.name = validate_name(new_name)?;
        }

        let icon_source = update.icon.as_deref().map(IconSource::parse).transpose()?;
        let icon = match icon_source {
            Some(source) => Some(self.obtain_icon(&source).await?),
            None => None,
        };

        let written = self.store.replace(name, updated, icon.as_ref())?;

        info!("Updated web app '{}'", written.name);
        Ok(written)
    }

    /// Remove a web app and its icon.
    pub fn remove(&self, name: &str) -> Result<()> {
        self.store.delete(name)?;
        info!("Removed web app '{}'", name);
        Ok(())
    }

    /// List registered web apps.
    pub fn list(&self) -> Result<Vec<WebAppSummary>> {
        self.store.list()
    }

    /// Look up a single web app.
    pub fn find(&self, name: &str) -> Result<WebApp> {
        self.store.find(name)
    }

    async fn obtain_icon(&self, source: &IconSource) -> Result<IconImage> {
        match source {
            IconSource::Url(url) => self.fetcher.download_icon(url).await,
            IconSource::File(path) => load_icon_file(path, self.fetcher.max_bytes()),
        }
    }
}

/// Builder for configuring a [`WebAppRegistry`].
///
/// # Example
///
/// ```rust,ignore
/// let registry = WebAppRegistry::builder("/tmp/applications")
///     .search_path(vec!["/usr/bin".into()])
///     .display_env(DisplayEnv::default())
///     .build()?;
/// ```
pub struct WebAppRegistryBuilder {
    apps_dir: PathBuf,
    search_path: Option<Vec<PathBuf>>,
    display_env: Option<DisplayEnv>,
    http_client: Option<reqwest::Client>,
}

impl WebAppRegistryBuilder {
    /// Create a new builder with the applications directory.
    pub fn new(apps_dir: impl Into<PathBuf>) -> Self {
        Self {
            apps_dir: apps_dir.into(),
            search_path: None,
            display_env: None,
            http_client: None,
        }
    }

    /// Directories searched for browser executables.
    ///
    /// Default: the directories in `$PATH`
    pub fn search_path(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_path = Some(dirs);
        self
    }

    /// Environment used for display-server detection.
    ///
    /// Default: captured from the current process
    pub fn display_env(mut self, env: DisplayEnv) -> Self {
        self.display_env = Some(env);
        self
    }

    /// HTTP client used for icon downloads.
    ///
    /// Default: a client with webdock's timeout and redirect limits
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the registry.
    pub fn build(self) -> Result<WebAppRegistry> {
        let fetcher = match self.http_client {
            Some(client) => FaviconFetcher::with_client(client),
            None => FaviconFetcher::new()?,
        };

        Ok(WebAppRegistry {
            store: EntryStore::new(&self.apps_dir),
            browsers: self
                .search_path
                .map(BrowserResolver::new)
                .unwrap_or_else(BrowserResolver::from_env),
            fetcher,
            display_env: self.display_env.unwrap_or_else(DisplayEnv::from_process),
        })
    }
}
