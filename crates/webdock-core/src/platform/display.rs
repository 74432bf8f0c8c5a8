//! Display-server detection.
//!
//! Chromium-family browsers need `--ozone-platform=wayland` to run natively
//! under Wayland, so the registry has to know which display server the
//! session uses when it writes an entry.

use crate::models::{Platform, Selection};
use tracing::debug;

/// Snapshot of the environment variables that identify the display server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayEnv {
    pub wayland_display: Option<String>,
    pub session_type: Option<String>,
    pub x11_display: Option<String>,
}

impl DisplayEnv {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self {
            wayland_display: std::env::var("WAYLAND_DISPLAY").ok(),
            session_type: std::env::var("XDG_SESSION_TYPE").ok(),
            x11_display: std::env::var("DISPLAY").ok(),
        }
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Classify the session, defaulting to X11 when the signals are ambiguous.
pub fn detect_platform(env: &DisplayEnv) -> Platform {
    if is_set(&env.wayland_display) {
        return Platform::Wayland;
    }
    if env.session_type.as_deref().map(str::trim) == Some("wayland") {
        return Platform::Wayland;
    }
    if !is_set(&env.x11_display) {
        debug!("No display server signals found, assuming x11");
    }
    Platform::X11
}

/// Resolve a platform selection. An explicit choice always wins.
pub fn resolve_platform(selection: &Selection<Platform>, env: &DisplayEnv) -> Platform {
    match selection {
        Selection::Explicit(platform) => *platform,
        Selection::Auto => {
            let platform = detect_platform(env);
            debug!("Detected display server: {}", platform);
            platform
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(wayland: Option<&str>, session: Option<&str>, x11: Option<&str>) -> DisplayEnv {
        DisplayEnv {
            wayland_display: wayland.map(String::from),
            session_type: session.map(String::from),
            x11_display: x11.map(String::from),
        }
    }

    #[test]
    fn test_detect_wayland_display() {
        assert_eq!(
            detect_platform(&env(Some("wayland-0"), None, Some(":0"))),
            Platform::Wayland
        );
    }

    #[test]
    fn test_detect_session_type() {
        assert_eq!(
            detect_platform(&env(None, Some("wayland"), None)),
            Platform::Wayland
        );
        assert_eq!(detect_platform(&env(None, Some("x11"), Some(":0"))), Platform::X11);
    }

    #[test]
    fn test_detect_defaults_to_x11() {
        assert_eq!(detect_platform(&DisplayEnv::default()), Platform::X11);
        assert_eq!(detect_platform(&env(Some(""), None, None)), Platform::X11);
    }

    #[test]
    fn test_explicit_platform_skips_detection() {
        let wayland_session = env(Some("wayland-0"), Some("wayland"), None);
        assert_eq!(
            resolve_platform(&Selection::Explicit(Platform::X11), &wayland_session),
            Platform::X11
        );
        assert_eq!(
            resolve_platform(&Selection::Auto, &wayland_session),
            Platform::Wayland
        );
    }
}
