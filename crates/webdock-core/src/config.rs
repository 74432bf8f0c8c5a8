//! Centralized configuration for webdock.
//!
//! This module provides configuration constants for network operations,
//! on-disk layout, and the generated entry files.

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const USER_AGENT: &'static str = concat!("webdock/", env!("CARGO_PKG_VERSION"));
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const FAVICON_TIMEOUT: Duration = Duration::from_secs(10);
    pub const MAX_REDIRECTS: usize = 3;
    pub const MAX_ICON_BYTES: usize = 1024 * 1024; // 1MB
    /// Candidate icon paths, tried in order against the web app's origin.
    pub const FAVICON_CANDIDATES: &'static [&'static str] =
        &["/favicon.ico", "/apple-touch-icon.png"];
}

/// Shared directory and path configurations.
pub struct PathsConfig;

impl PathsConfig {
    pub const ICONS_DIR_NAME: &'static str = "icons";
    pub const ENTRY_EXTENSION: &'static str = "desktop";
    pub const TEMP_PREFIX: &'static str = ".webdock-";
}

/// Fixed values written into every entry file.
pub struct EntryConfig;

impl EntryConfig {
    /// Theme icon used when a web app has no icon of its own.
    pub const DEFAULT_ICON: &'static str = "web-browser";
    pub const CATEGORIES: &'static [&'static str] = &["Network", "WebBrowser"];
    pub const APP_FLAG: &'static str = "--app=";
    pub const PLATFORM_FLAG: &'static str = "--ozone-platform=";
}
