//! End-to-end tests driving the `webdock` binary.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const DEAD_PROXY: &str = "http://127.0.0.1:1";

struct CliEnv {
    root: TempDir,
}

impl CliEnv {
    fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("bin")).unwrap();
        Self { root }
    }

    fn apps_dir(&self) -> PathBuf {
        self.root.path().join("applications")
    }

    fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    fn install_browser(&self, name: &str) {
        let path = self.bin_dir().join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Run webdock with an isolated PATH and every proxy pointed at a closed port.
    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_webdock"))
            .arg("--apps-dir")
            .arg(self.apps_dir())
            .args(args)
            .env("PATH", self.bin_dir())
            .env("HTTP_PROXY", DEAD_PROXY)
            .env("HTTPS_PROXY", DEAD_PROXY)
            .env("http_proxy", DEAD_PROXY)
            .env("https_proxy", DEAD_PROXY)
            .env("ALL_PROXY", DEAD_PROXY)
            .env_remove("NO_PROXY")
            .env_remove("no_proxy")
            .env("XDG_SESSION_TYPE", "x11")
            .env_remove("WAYLAND_DISPLAY")
            .output()
            .expect("Failed to run webdock")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn dir_is_empty(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(true)
}

#[test]
fn test_add_spotify_offline_then_list() {
    let env = CliEnv::new();
    env.install_browser("chromium");

    let output = env.run(&["add", "Spotify", "https://open.spotify.com"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("web-app 'Spotify' created successfully"));

    let content = fs::read_to_string(env.apps_dir().join("Spotify.desktop")).unwrap();
    assert!(content.contains("Icon=web-browser\n"));
    assert!(content.contains("--ozone-platform=x11"));

    let output = env.run(&["list"]);
    assert_eq!(output.status.code(), Some(0));
    let listing = stdout(&output);
    let row = listing
        .lines()
        .find(|line| line.trim_start().starts_with("Spotify"))
        .expect("Spotify row missing");
    assert!(row.contains("https://open.spotify.com"));
    assert!(row.ends_with("(no icon)"));
    assert!(listing.contains("Total: 1 web app(s)"));
}

#[test]
fn test_add_invalid_url_exits_with_validation_code() {
    let env = CliEnv::new();
    env.install_browser("chromium");

    let output = env.run(&["add", "Gmail", "not-a-url"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("error: "));
    assert!(!env.apps_dir().join("Gmail.desktop").exists());

    let output = env.run(&["list"]);
    assert_eq!(stdout(&output), "No web apps found.\n");
}

#[test]
fn test_add_unsupported_browser_creates_no_files() {
    let env = CliEnv::new();
    env.install_browser("chromium");

    let output = env.run(&[
        "add",
        "Discord",
        "https://discord.com/app",
        "--browser",
        "made-up-browser",
    ]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("made-up-browser"));
    assert!(dir_is_empty(&env.apps_dir()));
}

#[test]
fn test_add_duplicate_exits_with_duplicate_code() {
    let env = CliEnv::new();
    env.install_browser("chromium");

    assert_eq!(env.run(&["add", "Mail", "https://mail.example.com"]).status.code(), Some(0));
    let output = env.run(&["add", "Mail", "https://other.example.com"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_add_invalid_platform() {
    let env = CliEnv::new();
    env.install_browser("chromium");

    let output = env.run(&["add", "Mail", "https://mail.example.com", "--platform", "mir"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(dir_is_empty(&env.apps_dir()));
}

#[test]
fn test_update_then_remove() {
    let env = CliEnv::new();
    env.install_browser("brave");

    assert_eq!(env.run(&["add", "Mail", "https://mail.example.com"]).status.code(), Some(0));

    let output = env.run(&["update", "Mail", "--rename", "Inbox", "--url", "https://inbox.example.com"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("web-app 'Inbox' updated successfully"));
    assert!(!env.apps_dir().join("Mail.desktop").exists());

    let output = env.run(&["list", "--json"]);
    let apps: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let apps = apps.as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["name"], "Inbox");
    assert_eq!(apps[0]["url"], "https://inbox.example.com");
    assert_eq!(apps[0]["has_icon"], false);

    let output = env.run(&["remove", "Inbox"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("web-app 'Inbox' deleted successfully"));
    assert!(!env.apps_dir().join("Inbox.desktop").exists());
}

#[test]
fn test_remove_missing_exits_with_not_found_code() {
    let env = CliEnv::new();

    let output = env.run(&["remove", "Ghost"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Ghost"));
}
