//! To-do List MCP Server - Main Entry Point
//!
//! This is the main entry point for the to-do list MCP server application.
//! The actual implementation is in the `tdl_mcp` library.

use anyhow::{Context, Result};
use clap::Parser;
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use tdl_mcp::{Config, TdlServerHandler};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// To-do List MCP Server - named to-do lists via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the list data file (default: listdata.txt)
    file: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save after every change
    #[arg(long)]
    autosave: bool,
}

impl Args {
    /// Configuration file values with command-line flags applied on top
    fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(file) = &self.file {
            config.data_file = file.clone();
        }
        if self.autosave {
            config.autosave = true;
        }
        Ok(config)
    }
}

/// Log to stderr; stdout carries the MCP transport
fn init_tracing(config: &Config) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .or_else(|| {
            config
                .log_filter
                .as_deref()
                .and_then(|raw| EnvFilter::try_new(raw).ok())
        })
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve()?;
    init_tracing(&config);

    tracing::info!(
        data_file = %config.data_file.display(),
        autosave = config.autosave,
        "starting to-do list server"
    );
    let handler = TdlServerHandler::from_config(&config)?;
    serve_stdio(handler).await?;
    Ok(())
}
