//! Xcode Demon - build and run Xcode projects on iOS simulators from the terminal
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;
use xcdemon_core::prelude::*;

/// Xcode Demon - build and run Xcode projects on iOS simulators
#[derive(Parser, Debug)]
#[command(name = "xcdemon")]
#[command(about = "A terminal panel for building and running Xcode projects", long_about = None)]
struct Args {
    /// Workspace roots; the first is searched for a project
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Run in headless mode (NDJSON on stdout, requests on stdin)
    #[arg(long)]
    headless: bool,

    /// Write a default .xcdemon/config.toml into the first root and exit
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since stdout belongs to the UI)
    xcdemon_core::logging::init()?;

    let roots = xcode_demon::resolve_workspace_roots(args.paths)?;

    if args.init {
        if let Some(root) = roots.first() {
            xcdemon_app::config::init_config_dir(root)?;
            eprintln!("Config: {}", root.join(".xcdemon/config.toml").display());
        }
        return Ok(());
    }

    let result = if args.headless {
        xcode_demon::run_headless(roots).await
    } else {
        xcdemon_tui::run(roots).await
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("Xcode Demon exiting");
    result
}
