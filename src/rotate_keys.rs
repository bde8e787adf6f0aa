// src/rotate_keys.rs
//! Directory-wide re-encryption under a new master key
//!
//! Two strategies:
//!
//! - `Staged`: every entry is opened under the old key and sealed under the
//!   new key into a staging file before anything is renamed. A failure in
//!   that phase drops the staging files and leaves the directory untouched.
//!   The commit phase renames entries in sorted name order, marker last; only
//!   a crash or rename failure inside that loop can leave mixed keys behind.
//! - `InPlace`: each entry is overwritten as it is visited. The first failure
//!   aborts the scan, leaving earlier entries under the new key and the rest
//!   (plus the marker) under the old one.
//!
//! Neither strategy is atomic across the directory. Callers must not run any
//! other operation against the directory while a recode is in progress.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::consts::CHECK_PLAINTEXT;
use crate::core::crypto::{open, seal};
use crate::core::file;
use crate::core::layout::EntryLayout;
use crate::enums::RecodeStrategy;
use crate::error::{Result, StoreError};
use crate::key_ops::MasterKey;

/// Summary of a successful recode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecodeReport {
    /// Regular entries re-sealed (the marker is not counted)
    pub entries: usize,
    pub strategy: RecodeStrategy,
    pub old_fingerprint: String,
    pub new_fingerprint: String,
}

/// Open one envelope under `old_key` and seal its plaintext under `new_key`
pub fn reseal(envelope: &[u8], old_key: &MasterKey, new_key: &MasterKey) -> Result<Vec<u8>> {
    let plaintext = open(old_key, envelope)?;
    seal(new_key, &plaintext)
}

/// Re-seal every entry in `dir` plus the check marker under `new_key`
pub fn recode(
    dir: &Path,
    layout: &EntryLayout,
    old_key: &MasterKey,
    new_key: &MasterKey,
    strategy: RecodeStrategy,
) -> Result<RecodeReport> {
    let entries = layout.scan(dir)?;
    let marker = dir.join(layout.marker_file_name());
    info!(
        entries = entries.len(),
        ?strategy,
        from = %old_key.fingerprint(),
        to = %new_key.fingerprint(),
        "recode started"
    );

    let recoded = match strategy {
        RecodeStrategy::Staged => recode_staged(dir, &marker, entries, old_key, new_key)?,
        RecodeStrategy::InPlace => recode_in_place(dir, &marker, entries, old_key, new_key)?,
    };

    info!(entries = recoded, "recode finished");
    Ok(RecodeReport {
        entries: recoded,
        strategy,
        old_fingerprint: old_key.fingerprint(),
        new_fingerprint: new_key.fingerprint(),
    })
}

fn recode_staged(
    dir: &Path,
    marker: &Path,
    mut entries: Vec<(String, PathBuf)>,
    old_key: &MasterKey,
    new_key: &MasterKey,
) -> Result<usize> {
    entries.sort();

    let mut staged = Vec::with_capacity(entries.len() + 1);
    for (name, path) in &entries {
        let resealed = match fs::read(path)
            .map_err(StoreError::from)
            .and_then(|envelope| reseal(&envelope, old_key, new_key))
        {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(entry = %name, error = %e, "recode aborted before commit; directory unchanged");
                return Err(e);
            }
        };
        staged.push((file::stage(dir, &resealed)?, path.clone()));
    }
    staged.push((
        file::stage(dir, &seal(new_key, CHECK_PLAINTEXT)?)?,
        marker.to_path_buf(),
    ));

    let total = staged.len();
    for (committed, (temp, target)) in staged.into_iter().enumerate() {
        if let Err(e) = file::commit(temp, &target) {
            warn!(
                committed,
                total,
                target = %target.display(),
                error = %e,
                "recode commit interrupted; directory holds mixed keys"
            );
            return Err(e);
        }
    }
    Ok(entries.len())
}

fn recode_in_place(
    dir: &Path,
    marker: &Path,
    entries: Vec<(String, PathBuf)>,
    old_key: &MasterKey,
    new_key: &MasterKey,
) -> Result<usize> {
    for (done, (name, path)) in entries.iter().enumerate() {
        let result = fs::read(path)
            .map_err(StoreError::from)
            .and_then(|envelope| reseal(&envelope, old_key, new_key))
            .and_then(|resealed| file::write_atomic(dir, path, &resealed));
        if let Err(e) = result {
            warn!(
                entry = %name,
                recoded = done,
                remaining = entries.len() - done,
                error = %e,
                "in-place recode aborted; directory holds mixed keys"
            );
            return Err(e);
        }
    }
    file::write_atomic(dir, marker, &seal(new_key, CHECK_PLAINTEXT)?)?;
    Ok(entries.len())
}
