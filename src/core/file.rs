// src/core/file.rs
//! Whole-file I/O for envelopes
//!
//! Writes always go through a staging file in the target directory
//! followed by a rename, so a reader sees either the old envelope or
//! the new one, never a truncated mix.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::TempPath;
use tracing::debug;

use crate::consts::{STAGING_PREFIX, STAGING_SUFFIX};
use crate::error::Result;

/// Write `bytes` to a new staging file inside `dir`
///
/// The handle is closed before returning, so any number of files can be
/// staged at once. The file is deleted on drop unless it is committed.
pub fn stage(dir: &Path, bytes: &[u8]) -> Result<TempPath> {
    let mut staged = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(STAGING_SUFFIX)
        .tempfile_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    Ok(staged.into_temp_path())
}

/// Move a staged file over `target`, replacing any prior content
pub fn commit(staged: TempPath, target: &Path) -> Result<()> {
    staged.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Replace `target` (inside `dir`) with `bytes`
pub fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    commit(stage(dir, bytes)?, target)
}

/// Delete `path`; absence is not an error
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

pub fn is_staging_file(file_name: &str) -> bool {
    file_name.starts_with(STAGING_PREFIX) && file_name.ends_with(STAGING_SUFFIX)
}

/// Remove staging files left behind by an interrupted write
pub fn sweep_staging(dir: &Path) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let stale = entry
            .file_name()
            .to_str()
            .is_some_and(is_staging_file);
        if stale && entry.file_type()?.is_file() {
            remove_if_exists(&entry.path())?;
            debug!(path = %entry.path().display(), "removed stale staging file");
            removed += 1;
        }
    }
    Ok(removed)
}
