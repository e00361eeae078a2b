//! Console progress output for sync runs.

use std::io::{self, Write};
use std::path::Path;

use crate::sync::{SyncReporter, SyncSummary};

/// Progress reporter that prints to a writer (stdout by default).
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Progress lines are best effort; a closed stdout must not abort the sync.
impl<W: Write> SyncReporter for ConsoleReporter<W> {
    fn on_start(&mut self, database_id: &str) {
        let _ = writeln!(self.out, "Syncing content from Notion...");
        let _ = writeln!(self.out, "Database ID: {}", database_id);
    }

    fn on_pages_found(&mut self, count: usize) {
        let _ = writeln!(self.out, "Found {} posts", count);
    }

    fn on_page(&mut self, title: &str) {
        let _ = writeln!(self.out, "Processing: {}", title);
    }

    fn on_saved(&mut self, path: &Path, dry_run: bool) {
        if dry_run {
            let _ = writeln!(self.out, "  would write: {}", path.display());
        } else {
            let _ = writeln!(self.out, "  ✓ Saved: {}", path.display());
        }
    }

    fn on_complete(&mut self, summary: &SyncSummary) {
        let _ = writeln!(self.out);
        if summary.dry_run {
            let _ = writeln!(
                self.out,
                "Dry run complete! {} posts rendered, nothing written",
                summary.pages
            );
        } else {
            let _ = writeln!(self.out, "Sync complete! Processed {} posts", summary.pages);
        }
    }
}
