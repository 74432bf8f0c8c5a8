//! webdock core - headless registry for browser-backed desktop web apps.
//!
//! A web app is a `.desktop` entry that opens a URL in a Chromium-family
//! browser's app mode, so the desktop treats the site as its own application.
//! This crate validates input, picks a browser and display server, fetches an
//! icon, and keeps the entry files and icons in the applications directory
//! consistent. It performs no terminal I/O; see `webdock-cli` for the binary.
//!
//! # Example
//!
//! ```rust,ignore
//! use webdock_core::{AddRequest, WebAppRegistry};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> webdock_core::Result<()> {
//!     let registry = WebAppRegistry::new()?;
//!
//!     registry
//!         .add(AddRequest {
//!             name: "Spotify".into(),
//!             url: "https://open.spotify.com".into(),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     for app in registry.list()? {
//!         println!("{} {}", app.name, app.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod platform;
pub mod registry;
pub mod store;
pub mod validate;

// Re-export commonly used types
pub use browser::{BrowserResolver, ResolvedBrowser, SUPPORTED_BROWSERS};
pub use error::{Result, WebdockError};
pub use models::{
    IconImage, IconSource, Platform, Selection, WebApp, WebAppSummary, WebAppUpdate,
};
pub use platform::DisplayEnv;
pub use registry::{AddRequest, WebAppRegistry, WebAppRegistryBuilder};
pub use store::EntryStore;
pub use validate::{validate_name, validate_url, ValidUrl};
