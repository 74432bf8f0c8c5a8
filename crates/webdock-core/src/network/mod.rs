//! Network operations.
//!
//! The only outbound traffic is icon retrieval: a best-effort favicon lookup
//! when the user gives no icon, or a download of an icon URL they did give.

pub mod client;
pub mod favicon;

pub use client::{build_client, client_builder};
pub use favicon::{extension_for_content_type, load_icon_file, FaviconFetcher};
