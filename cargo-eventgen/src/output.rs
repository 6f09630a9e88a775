//! Output writer for the generated registry.
//!
//! Writes go to a temporary sibling file that is synced and then renamed
//! over the target, so readers only ever observe the old or the new
//! contents.

use std::io::Write;

use camino::Utf8Path;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::EventgenError;
use crate::fs_helpers::{open_parent, read_optional};

/// What a write or check did to the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or replaced.
    Written,
    /// The file already held identical contents and was left alone.
    Unchanged,
    /// Check mode found the file up to date.
    Fresh,
}

/// Atomically replaces `path` with `contents`.
///
/// The parent directory must already exist.
///
/// # Errors
///
/// Returns [`EventgenError::Write`] on any I/O failure; no temporary file is
/// left behind.
pub fn write_atomic(path: &Utf8Path, contents: &str) -> Result<WriteOutcome, EventgenError> {
    let write_error = |source: std::io::Error| EventgenError::Write {
        path: path.to_path_buf(),
        source,
    };
    let (dir, file_name) = open_parent(path).map_err(write_error)?;

    match read_optional(&dir, file_name) {
        Ok(Some(existing)) if existing == contents => {
            tracing::info!(%path, "generated file is already up to date");
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => {}
        Err(err) => {
            tracing::debug!(%path, error = %err, "existing file not compared; replacing it");
        }
    }

    let temp_name = format!(".{file_name}.{}.tmp", std::process::id());
    if let Err(err) = replace_via(&dir, &temp_name, file_name, contents) {
        if let Err(cleanup) = dir.remove_file(&temp_name) {
            tracing::debug!(temp = %temp_name, error = %cleanup, "temporary file not removed");
        }
        return Err(write_error(err));
    }

    tracing::info!(%path, bytes = contents.len(), "wrote generated file");
    Ok(WriteOutcome::Written)
}

fn replace_via(dir: &Dir, temp_name: &str, file_name: &str, contents: &str) -> std::io::Result<()> {
    let mut file = dir.open_with(
        temp_name,
        OpenOptions::new().write(true).create(true).truncate(true),
    )?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);
    dir.rename(temp_name, dir, file_name)
}

/// Confirms that `path` already holds exactly `contents`.
///
/// # Errors
///
/// Returns [`EventgenError::Stale`] when the file is missing or differs, and
/// [`EventgenError::Write`] when it cannot be read.
pub fn check_fresh(path: &Utf8Path, contents: &str) -> Result<WriteOutcome, EventgenError> {
    let read = open_parent(path).and_then(|(dir, file_name)| read_optional(&dir, file_name));
    match read {
        Ok(Some(existing)) if existing == contents => Ok(WriteOutcome::Fresh),
        Ok(_) => Err(EventgenError::Stale {
            path: path.to_path_buf(),
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(EventgenError::Stale {
            path: path.to_path_buf(),
        }),
        Err(err) => Err(EventgenError::Write {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}
