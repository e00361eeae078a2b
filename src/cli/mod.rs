//! Command line definition, configuration and console output

pub mod config;
pub mod output;

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// notion-sync - render a Notion database into static-site Markdown posts
///
/// Reads NOTION_TOKEN and NOTION_DATABASE_ID from the environment.
#[derive(Parser, Debug)]
#[command(name = "notion-sync", version, about, long_about = None)]
pub struct Cli {
    /// Output directory (overrides config file; default: content/posts)
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Fetch and render every page without writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter directive for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
