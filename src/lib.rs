//! notion-sync - render a Notion database into static-site Markdown posts

pub mod cli;
pub mod domain;
pub mod infra;
pub mod notion;
pub mod render;
pub mod sync;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, config::Config, output::ConsoleReporter};
use notion::HttpNotionClient;
use sync::{SyncOptions, sync};

/// Exit status for configuration errors (missing variables, bad config file).
pub const CONFIG_ERROR_EXIT: u8 = 2;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let config = Config::load(cli.output_dir.as_deref())?;
    tracing::debug!(?config, "loaded configuration");

    let client = HttpNotionClient::new(&config.token, &config.api_url, &config.notion_version)
        .context("failed to create Notion client")?;

    let options = SyncOptions {
        dry_run: cli.dry_run,
    };
    let today = Local::now().date_naive();
    let mut reporter = ConsoleReporter::new();

    sync(&client, &config, options, today, &mut reporter)?;
    Ok(())
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,notion_sync={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
