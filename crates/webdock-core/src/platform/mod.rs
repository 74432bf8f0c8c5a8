//! Platform abstraction layer.
//!
//! All environment- and OS-specific lookups live here:
//! - `paths` - Where entry files and icons are stored
//! - `permissions` - Executable bits on entry files and browser binaries
//! - `display` - Wayland vs X11 detection

pub mod display;
pub mod paths;
pub mod permissions;

pub use display::{detect_platform, resolve_platform, DisplayEnv};
pub use paths::{apps_dir, entry_file_stem, icons_dir};
pub use permissions::{is_executable, set_executable};
