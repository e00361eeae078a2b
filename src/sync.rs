//! Sync driver: database rows in, Markdown posts out.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cli::config::Config;
use crate::domain::{assemble, resolve_title};
use crate::infra::{FsError, ensure_dir, generate_filename, write_document};
use crate::notion::{BlockKind, NotionApi, NotionError};
use crate::render::render_blocks;

// ===========================================
// SyncError Type
// ===========================================

/// Errors that abort a sync run.
///
/// Files written before the failing page stay on disk.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to prepare output directory: {0}")]
    OutputDir(#[source] FsError),

    #[error("failed to query database {database_id}: {source}")]
    Query {
        database_id: String,
        #[source]
        source: NotionError,
    },

    #[error("failed to fetch blocks for '{title}' ({page_id}): {source}")]
    Blocks {
        page_id: String,
        title: String,
        #[source]
        source: NotionError,
    },

    #[error("failed to write '{title}': {source}")]
    Write {
        title: String,
        #[source]
        source: FsError,
    },
}

// ===========================================
// Progress Reporting
// ===========================================

/// Receives progress events during a sync run.
pub trait SyncReporter {
    /// Called before the database is queried.
    fn on_start(&mut self, database_id: &str);
    /// Called once the page list is known.
    fn on_pages_found(&mut self, count: usize);
    /// Called before a page's blocks are fetched.
    fn on_page(&mut self, title: &str);
    /// Called after a post is written (or would be, in a dry run).
    fn on_saved(&mut self, path: &Path, dry_run: bool);
    /// Called when every page has been processed.
    fn on_complete(&mut self, summary: &SyncSummary);
}

/// A no-op progress reporter.
#[derive(Default)]
pub struct NoopReporter;

impl SyncReporter for NoopReporter {
    fn on_start(&mut self, _database_id: &str) {}
    fn on_pages_found(&mut self, _count: usize) {}
    fn on_page(&mut self, _title: &str) {}
    fn on_saved(&mut self, _path: &Path, _dry_run: bool) {}
    fn on_complete(&mut self, _summary: &SyncSummary) {}
}

// ===========================================
// Driver
// ===========================================

/// Options that change how a run touches the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Render everything but write nothing.
    pub dry_run: bool,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Number of pages returned by the database.
    pub pages: usize,
    /// Output paths in processing order. Repeats when slugs collide.
    pub written: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Pulls every page of the configured database and writes one post per page.
///
/// Pages are processed in the order the API returns them. The first failure
/// aborts the run.
///
/// `today` is the date used for pages without a date property.
pub fn sync<A, R>(
    api: &A,
    config: &Config,
    options: SyncOptions,
    today: NaiveDate,
    reporter: &mut R,
) -> Result<SyncSummary, SyncError>
where
    A: NotionApi + ?Sized,
    R: SyncReporter,
{
    if !options.dry_run {
        ensure_dir(&config.output_dir).map_err(SyncError::OutputDir)?;
    }

    reporter.on_start(&config.database_id);

    let pages = api
        .query_database(&config.database_id)
        .map_err(|source| SyncError::Query {
            database_id: config.database_id.clone(),
            source,
        })?;
    info!(count = pages.len(), "queried database");
    reporter.on_pages_found(pages.len());

    let mut summary = SyncSummary {
        pages: pages.len(),
        written: Vec::with_capacity(pages.len()),
        dry_run: options.dry_run,
    };
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for page in &pages {
        let title = resolve_title(&page.properties);
        reporter.on_page(&title);

        let blocks = api
            .list_block_children(&page.id)
            .map_err(|source| SyncError::Blocks {
                page_id: page.id.clone(),
                title: title.clone(),
                source,
            })?;
        debug!(page_id = %page.id, blocks = blocks.len(), "fetched blocks");
        for block in blocks.iter().filter(|b| b.kind == BlockKind::Unsupported) {
            debug!(page_id = %page.id, block_id = %block.id, "skipping unsupported block");
        }

        let body = render_blocks(&blocks);
        let document = assemble(&page.properties, &body, today);

        let filename = generate_filename(&title);
        if filename == ".md" {
            warn!(page_id = %page.id, title = %title, "title has no filename characters, writing .md");
        }
        let path = config.output_dir.join(&filename);
        if !seen.insert(path.clone()) {
            warn!(page_id = %page.id, path = %path.display(), "overwriting a post written earlier in this run");
        }

        if !options.dry_run {
            write_document(&path, &document).map_err(|source| SyncError::Write {
                title: title.clone(),
                source,
            })?;
        }
        info!(page_id = %page.id, path = %path.display(), "saved post");
        reporter.on_saved(&path, options.dry_run);
        summary.written.push(path);
    }

    reporter.on_complete(&summary);
    Ok(summary)
}
