//! webdock - manage browser-backed web apps as desktop entries.
//!
//! Thin front end over `webdock-core`: parses arguments, sets up logging,
//! runs one command and maps its outcome to a process exit code.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;
use webdock_core::WebAppRegistry;

#[derive(Parser, Debug)]
#[command(name = "webdock", version)]
#[command(about = "Create, update, remove and list web apps")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Directory holding the desktop entries (defaults to the user's applications dir)
    #[arg(long, global = true)]
    apps_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new web app
    Add {
        /// Display name of the web app
        name: String,
        /// Address opened in the app window
        url: String,
        /// Icon URL or local image file (defaults to the site's favicon)
        icon: Option<String>,
        /// Browser executable to launch (defaults to the first installed one)
        #[arg(long)]
        browser: Option<String>,
        /// Display platform: wayland or x11 (defaults to the detected one)
        #[arg(long)]
        platform: Option<String>,
    },
    /// Change the url, icon or name of a web app
    Update {
        name: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        rename: Option<String>,
    },
    /// Remove a web app and its icon
    Remove { name: String },
    /// List registered web apps
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let registry = match args.apps_dir {
        Some(ref dir) => WebAppRegistry::builder(dir).build(),
        None => WebAppRegistry::new(),
    };

    let outcome = registry.and_then(|registry| {
        debug!(
            "Using applications directory {}",
            registry.store().apps_dir().display()
        );
        runtime.block_on(commands::run(&registry, args.command))
    });

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e);
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
