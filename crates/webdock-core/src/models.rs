//! Core data types shared by the registry components.

use crate::error::{Result, WebdockError};
use crate::validate::{validate_url_field, ValidUrl};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A registered web app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebApp {
    /// Display name; unique across the registry.
    pub name: String,
    /// Navigation target, stored as the user typed it.
    pub url: String,
    /// Locally stored icon. `None` means the generic default icon.
    pub icon_path: Option<PathBuf>,
    /// Browser executable used to launch app mode.
    pub browser_command: String,
    /// Display server forced through the browser's ozone flag.
    pub platform: Option<Platform>,
}

/// One row of `list` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebAppSummary {
    pub name: String,
    pub url: String,
    pub has_icon: bool,
}

/// Field changes applied by `update`. Unset fields keep their prior value.
#[derive(Debug, Clone, Default)]
pub struct WebAppUpdate {
    pub url: Option<String>,
    pub icon: Option<String>,
    pub rename: Option<String>,
}

impl WebAppUpdate {
    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.icon.is_none() && self.rename.is_none()
    }
}

/// Either detect a value automatically or use the one the caller gave.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    Auto,
    Explicit(T),
}

impl<T> Selection<T> {
    /// `Explicit` when a value is present, `Auto` otherwise.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Selection::Explicit(v),
            None => Selection::Auto,
        }
    }
}

/// Display-server family the browser should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Wayland,
    X11,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Wayland => "wayland",
            Platform::X11 => "x11",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = WebdockError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wayland" => Ok(Platform::Wayland),
            "x11" => Ok(Platform::X11),
            other => Err(WebdockError::validation(
                "platform",
                format!("invalid platform '{}' (must be 'wayland' or 'x11')", other),
            )),
        }
    }
}

/// Downloaded or copied icon contents, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub bytes: Vec<u8>,
    /// File extension without the dot (`png`, `ico`, ...).
    pub extension: &'static str,
}

/// Where an explicitly supplied icon comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    Url(ValidUrl),
    File(PathBuf),
}

impl IconSource {
    /// Interpret user input as a remote URL when it has a scheme, else as a path.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.contains("://") {
            return validate_url_field("icon", input).map(IconSource::Url);
        }
        if input.is_empty() {
            return Err(WebdockError::validation("icon", "icon must not be empty"));
        }
        Ok(IconSource::File(PathBuf::from(input)))
    }
}
