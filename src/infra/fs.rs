//! Output directory handling and atomic document writes.

use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while writing generated posts.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("parent directory does not exist: {path}")]
    ParentNotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Creates the output directory and any missing parents.
///
/// Succeeds if the directory already exists.
///
/// # Errors
///
/// Returns `FsError::NotADirectory` if the path exists but is a file.
/// Returns `FsError::CreateDir` if creation fails.
pub fn ensure_dir(path: &Path) -> Result<(), FsError> {
    if path.exists() && !path.is_dir() {
        return Err(FsError::NotADirectory { path: path.into() });
    }

    std::fs::create_dir_all(path).map_err(|source| FsError::CreateDir {
        path: path.into(),
        source,
    })
}

/// Writes a document to `path`, replacing any existing file.
///
/// Uses atomic write (temp file + rename) so a reader never sees a
/// half-written post. An existing file keeps its permissions. A new file
/// gets the mode a plain create would give it (0o666 less the umask).
///
/// # Errors
///
/// Returns `FsError::ParentNotFound` if the parent directory doesn't exist.
/// Returns `FsError::AtomicWrite` if the atomic rename fails.
pub fn write_document(path: &Path, content: &str) -> Result<(), FsError> {
    let parent = path
        .parent()
        .ok_or_else(|| FsError::ParentNotFound { path: path.into() })?;

    if !parent.exists() {
        return Err(FsError::ParentNotFound {
            path: parent.into(),
        });
    }

    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut temp = temp_builder()
        .tempfile_in(parent)
        .map_err(|e| FsError::from_io(path, e))?;

    if let Some(permissions) = existing {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| FsError::from_io(path, e))?;
    }

    temp.write_all(content.as_bytes())
        .map_err(|e| FsError::from_io(path, e))?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

#[cfg(unix)]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    builder.permissions(std::fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}
