//! Error types for webdock.
//!
//! Every failure the registry can report maps onto one variant of
//! [`WebdockError`]. The CLI turns each category into a distinct process exit
//! code via [`WebdockError::exit_code`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the webdock library.
#[derive(Debug, Error)]
pub enum WebdockError {
    // Input validation
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Registry lookups
    #[error("Web app already exists: {name}")]
    DuplicateName { name: String },

    #[error("Web app not found: {name} (names are case-sensitive)")]
    NotFound { name: String },

    // Browser resolution
    #[error("Unsupported browser '{name}' (supported: {})", supported.join(", "))]
    UnsupportedBrowser {
        name: String,
        supported: Vec<String>,
    },

    #[error("Browser '{name}' is supported but no executable was found on the search path")]
    BrowserNotFound { name: String },

    #[error("No supported browser found (supported: {})", supported.join(", "))]
    NoBrowserFound { supported: Vec<String> },

    // Network
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for webdock operations.
pub type Result<T> = std::result::Result<T, WebdockError>;

impl From<std::io::Error> for WebdockError {
    fn from(err: std::io::Error) -> Self {
        WebdockError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for WebdockError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        WebdockError::Fetch { url, message }
    }
}

impl WebdockError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        WebdockError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a validation error for a named input field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        WebdockError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Convert to a process exit code.
    ///
    /// - 1: I/O or configuration failure
    /// - 2: Invalid input
    /// - 3: Name already registered
    /// - 4: Name not registered
    /// - 5: Browser resolution failed
    /// - 6: Explicit icon download failed
    pub fn exit_code(&self) -> u8 {
        match self {
            WebdockError::Validation { .. } => 2,

            WebdockError::DuplicateName { .. } => 3,

            WebdockError::NotFound { .. } => 4,

            WebdockError::UnsupportedBrowser { .. }
            | WebdockError::BrowserNotFound { .. }
            | WebdockError::NoBrowserFound { .. } => 5,

            WebdockError::Fetch { .. } => 6,

            WebdockError::Io { .. } | WebdockError::Config { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WebdockError::NotFound {
            name: "Spotify".into(),
        };
        assert_eq!(
            err.to_string(),
            "Web app not found: Spotify (names are case-sensitive)"
        );

        let err = WebdockError::UnsupportedBrowser {
            name: "made-up-browser".into(),
            supported: vec!["chromium".into(), "brave".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported browser 'made-up-browser' (supported: chromium, brave)"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(WebdockError::validation("url", "empty").exit_code(), 2);
        assert_eq!(
            WebdockError::DuplicateName { name: "a".into() }.exit_code(),
            3
        );
        assert_eq!(
            WebdockError::NoBrowserFound { supported: vec![] }.exit_code(),
            5
        );
        assert_eq!(
            WebdockError::from(std::io::Error::other("disk full")).exit_code(),
            1
        );
    }
}
