//! Desktop entry (.desktop file) generation and parsing.
//!
//! Implements the parts of the XDG Desktop Entry Specification the registry
//! needs: string escaping, `Exec` argument quoting, and reading back the
//! `[Desktop Entry]` group of files written by this module.

use crate::config::EntryConfig;
use crate::models::{Platform, WebApp};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

const GROUP_HEADER: &str = "[Desktop Entry]";

/// Characters that force an `Exec` argument to be quoted.
const RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(', ')',
    '`',
];

/// A desktop entry representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Entry name (shown in menus).
    pub name: String,
    /// Comment/description.
    pub comment: Option<String>,
    /// Executable command line, already quoted.
    pub exec: String,
    /// Icon name or absolute path.
    pub icon: String,
    /// Whether to run in a terminal.
    pub terminal: bool,
    /// Entry type (usually "Application").
    pub entry_type: String,
    /// Menu categories.
    pub categories: Vec<String>,
    /// Whether the shell should show startup feedback.
    pub startup_notify: bool,
    /// StartupWMClass for window matching.
    pub startup_wm_class: Option<String>,
}

impl Default for DesktopEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            comment: None,
            exec: String::new(),
            icon: EntryConfig::DEFAULT_ICON.to_string(),
            terminal: false,
            entry_type: "Application".to_string(),
            categories: EntryConfig::CATEGORIES.iter().map(|c| c.to_string()).collect(),
            startup_notify: true,
            startup_wm_class: None,
        }
    }
}

impl fmt::Display for DesktopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", GROUP_HEADER)?;
        writeln!(f, "Version=1.0")?;
        writeln!(f, "Name={}", escape_value(&self.name))?;

        if let Some(ref comment) = self.comment {
            writeln!(f, "Comment={}", escape_value(comment))?;
        }

        writeln!(f, "Exec={}", escape_value(&self.exec))?;
        writeln!(f, "Terminal={}", self.terminal)?;
        writeln!(f, "Type={}", self.entry_type)?;
        writeln!(f, "Icon={}", escape_value(&self.icon))?;
        writeln!(f, "StartupNotify={}", self.startup_notify)?;

        if let Some(ref wm_class) = self.startup_wm_class {
            writeln!(f, "StartupWMClass={}", escape_value(wm_class))?;
        }

        if !self.categories.is_empty() {
            writeln!(f, "Categories={};", self.categories.join(";"))?;
        }

        Ok(())
    }
}

impl DesktopEntry {
    /// Create a new desktop entry builder.
    pub fn builder() -> DesktopEntryBuilder {
        DesktopEntryBuilder::new()
    }

    /// Parse the `[Desktop Entry]` group of a .desktop file.
    ///
    /// Returns `None` when the group is missing, is not an application, or
    /// lacks a `Name` or `Exec` key. Localised keys (`Name[de]=`) are ignored.
    pub fn parse(content: &str) -> Option<Self> {
        let mut entries = HashMap::new();
        let mut in_desktop_entry = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                in_desktop_entry = line == GROUP_HEADER;
                continue;
            }

            if in_desktop_entry {
                if let Some((key, value)) = line.split_once('=') {
                    entries
                        .entry(key.trim().to_string())
                        .or_insert_with(|| unescape_value(value.trim()));
                }
            }
        }

        if entries.get("Type").map(String::as_str) != Some("Application") {
            return None;
        }

        let flag = |key: &str, default: bool| {
            entries
                .get(key)
                .map(|v| v == "true")
                .unwrap_or(default)
        };

        Some(Self {
            name: entries.get("Name")?.clone(),
            comment: entries.get("Comment").cloned(),
            exec: entries.get("Exec")?.clone(),
            icon: entries.get("Icon").cloned().unwrap_or_default(),
            terminal: flag("Terminal", false),
            startup_notify: flag("StartupNotify", false),
            startup_wm_class: entries.get("StartupWMClass").cloned(),
            categories: entries
                .get("Categories")
                .map(|s| {
                    s.split(';')
                        .filter(|c| !c.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            entry_type: "Application".to_string(),
        })
    }

    /// Build the entry that launches a web app in app mode.
    pub fn for_webapp(app: &WebApp) -> Self {
        let mut args = vec![app.browser_command.clone(), "--new-window".to_string()];
        if let Some(platform) = app.platform {
            args.push(format!("{}{}", EntryConfig::PLATFORM_FLAG, platform));
        }
        args.push(format!("{}{}", EntryConfig::APP_FLAG, app.url));
        args.push(format!("--name={}", app.name));
        args.push(format!("--class={}", app.name));

        let icon = app
            .icon_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| EntryConfig::DEFAULT_ICON.to_string());

        DesktopEntry::builder()
            .name(&app.name)
            .comment(&app.name)
            .exec(build_exec(&args))
            .icon(icon)
            .startup_wm_class(&app.name)
            .build()
    }

    /// Recover the web app described by this entry.
    ///
    /// Returns `None` for entries that do not launch a browser in app mode.
    pub fn to_webapp(&self) -> Option<WebApp> {
        let args = split_exec(&self.exec);
        let browser_command = args.first()?.clone();

        let url = args
            .iter()
            .find_map(|a| a.strip_prefix(EntryConfig::APP_FLAG))
            .filter(|url| !url.is_empty())?
            .to_string();

        let platform = args
            .iter()
            .find_map(|a| a.strip_prefix(EntryConfig::PLATFORM_FLAG))
            .and_then(|p| p.parse::<Platform>().ok());

        let icon_path = Some(PathBuf::from(&self.icon)).filter(|p| p.is_absolute());

        Some(WebApp {
            name: self.name.clone(),
            url,
            icon_path,
            browser_command,
            platform,
        })
    }
}

/// Builder for desktop entries.
pub struct DesktopEntryBuilder {
    entry: DesktopEntry,
}

impl DesktopEntryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entry: DesktopEntry::default(),
        }
    }

    /// Set the entry name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entry.name = name.into();
        self
    }

    /// Set the comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.entry.comment = Some(comment.into());
        self
    }

    /// Set the executable command.
    pub fn exec(mut self, exec: impl Into<String>) -> Self {
        self.entry.exec = exec.into();
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.entry.icon = icon.into();
        self
    }

    /// Set the StartupWMClass.
    pub fn startup_wm_class(mut self, wm_class: impl Into<String>) -> Self {
        self.entry.startup_wm_class = Some(wm_class.into());
        self
    }

    /// Build the desktop entry.
    pub fn build(self) -> DesktopEntry {
        self.entry
    }
}

impl Default for DesktopEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape a string value (`\s`, `\n`, `\t`, `\r`, `\\`).
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Quote a single `Exec` argument.
fn quote_exec_arg(arg: &str) -> String {
    let arg = arg.replace('%', "%%");
    if !arg.is_empty() && !arg.contains(RESERVED) {
        return arg;
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Join arguments into an `Exec` command line.
pub fn build_exec(args: &[String]) -> String {
    args.iter()
        .map(|a| quote_exec_arg(a))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split an `Exec` command line back into arguments.
pub fn split_exec(exec: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut in_quotes = false;
    let mut chars = exec.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => in_quotes = false,
                '\\' if matches!(chars.peek(), Some('"' | '`' | '$' | '\\')) => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                _ => current.push(c),
            }
            continue;
        }

        match c {
            ' ' | '\t' => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            '"' => {
                in_quotes = true;
                in_arg = true;
            }
            _ => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if in_arg {
        args.push(current);
    }

    args.into_iter().map(|a| a.replace("%%", "%")).collect()
}
