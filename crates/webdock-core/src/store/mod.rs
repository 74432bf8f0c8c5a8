//! Web app persistence.
//!
//! Provides:
//! - Entry files (.desktop) in the user's applications directory
//! - Icon files in an `icons/` subdirectory next to them
//! - Atomic staged writes so a reader never sees a half-written entry
//!
//! # Example
//!
//! ```rust,ignore
//! use webdock_core::store::EntryStore;
//!
//! let store = EntryStore::new("/home/me/.local/share/applications");
//! for app in store.list()? {
//!     println!("{} {}", app.name, app.url);
//! }
//! ```

mod atomic;
mod desktop_entry;
mod entry_store;

pub use atomic::{atomic_write, remove_if_exists, StagedFile};
pub use desktop_entry::{build_exec, split_exec, DesktopEntry, DesktopEntryBuilder};
pub use entry_store::EntryStore;
