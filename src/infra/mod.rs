//! Filenames and file output

mod fs;
mod slug;

pub use fs::{FsError, ensure_dir, write_document};
pub use slug::{generate_filename, sanitize_filename};
