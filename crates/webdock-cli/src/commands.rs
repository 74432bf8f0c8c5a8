//! Subcommand execution and console output.

use crate::Command;
use std::str::FromStr;
use webdock_core::{
    AddRequest, Platform, Result, Selection, WebAppRegistry, WebAppSummary, WebAppUpdate,
};

/// Run one subcommand against the registry.
pub async fn run(registry: &WebAppRegistry, command: Command) -> Result<()> {
    match command {
        Command::Add {
            name,
            url,
            icon,
            browser,
            platform,
        } => {
            let platform = platform.as_deref().map(Platform::from_str).transpose()?;
            let app = registry
                .add(AddRequest {
                    name,
                    url,
                    icon,
                    browser: Selection::from_option(browser),
                    platform: Selection::from_option(platform),
                })
                .await?;
            println!("web-app '{}' created successfully", app.name);
        }
        Command::Update {
            name,
            url,
            icon,
            rename,
        } => {
            let app = registry
                .update(&name, WebAppUpdate { url, icon, rename })
                .await?;
            println!("web-app '{}' updated successfully", app.name);
        }
        Command::Remove { name } => {
            registry.remove(&name)?;
            println!("web-app '{}' deleted successfully", name);
        }
        Command::List { json } => {
            let mut apps = registry.list()?;
            apps.sort_by(|a, b| a.name.cmp(&b.name));
            if json {
                let out = serde_json::to_string_pretty(&apps).map_err(std::io::Error::from)?;
                println!("{}", out);
            } else {
                print!("{}", render_list(&apps));
            }
        }
    }
    Ok(())
}

/// Format the human-readable listing.
fn render_list(apps: &[WebAppSummary]) -> String {
    if apps.is_empty() {
        return "No web apps found.\n".to_string();
    }

    let mut out = String::new();
    for app in apps {
        let marker = if app.has_icon { "" } else { " (no icon)" };
        out.push_str(&format!("  {:20} {}{}\n", app.name, app.url, marker));
    }
    out.push_str(&format!("Total: {} web app(s)\n", apps.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, url: &str, has_icon: bool) -> WebAppSummary {
        WebAppSummary {
            name: name.to_string(),
            url: url.to_string(),
            has_icon,
        }
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_list(&[]), "No web apps found.\n");
    }

    #[test]
    fn test_render_list() {
        let out = render_list(&[
            summary("Mail", "https://mail.example.com", true),
            summary("Spotify", "https://open.spotify.com", false),
        ]);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("  {:20} https://mail.example.com", "Mail"));
        assert_eq!(
            lines[1],
            format!("  {:20} https://open.spotify.com (no icon)", "Spotify")
        );
        assert_eq!(lines[2], "Total: 2 web app(s)");
    }
}
