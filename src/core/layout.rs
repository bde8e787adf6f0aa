// src/core/layout.rs
//! Entry name ↔ filename mapping
//!
//! Entries live at `<dir>/<name>.<entry_suffix>`, the check marker at
//! `<dir>/check.<marker_suffix>`. Suffixes are restricted to
//! `[A-Za-z0-9_-]` and must differ, which keeps the marker out of every
//! listing and makes suffix stripping lossless.

use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::{
    CHECK_MARKER_NAME, DEFAULT_ENTRY_SUFFIX, DEFAULT_MARKER_SUFFIX, STAGING_PREFIX,
};
use crate::core::file::is_staging_file;
use crate::error::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLayout {
    entry_ext: String,
    marker_file: String,
}

impl EntryLayout {
    pub fn new(entry_suffix: &str, marker_suffix: &str) -> Result<Self> {
        validate_suffix(entry_suffix)?;
        validate_suffix(marker_suffix)?;
        if entry_suffix == marker_suffix {
            return Err(StoreError::InvalidConfig(format!(
                "entry and marker suffix must differ (both {entry_suffix:?})"
            )));
        }
        Ok(Self {
            entry_ext: format!(".{entry_suffix}"),
            marker_file: format!("{CHECK_MARKER_NAME}.{marker_suffix}"),
        })
    }

    /// Filename backing entry `name`
    pub fn file_name(&self, name: &str) -> Result<String> {
        validate_name(name)?;
        Ok(format!("{name}{}", self.entry_ext))
    }

    /// Inverse of `file_name`; `None` for anything that is not an entry file
    pub fn entry_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        if is_staging_file(file_name) {
            return None;
        }
        file_name
            .strip_suffix(self.entry_ext.as_str())
            .filter(|name| validate_name(name).is_ok())
    }

    pub fn marker_file_name(&self) -> &str {
        &self.marker_file
    }

    /// Every entry file directly under `dir`, in directory order
    pub fn scan(&self, dir: &Path) -> Result<Vec<(String, PathBuf)>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().and_then(|f| self.entry_name(f)) else {
                continue;
            };
            found.push((name.to_owned(), entry.path()));
        }
        Ok(found)
    }
}

impl Default for EntryLayout {
    fn default() -> Self {
        Self {
            entry_ext: format!(".{DEFAULT_ENTRY_SUFFIX}"),
            marker_file: format!("{CHECK_MARKER_NAME}.{DEFAULT_MARKER_SUFFIX}"),
        }
    }
}

/// Names must map to exactly one file directly under the store directory
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.starts_with(STAGING_PREFIX)
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StoreError::InvalidEntryName(name.to_owned()));
    }
    Ok(())
}

fn validate_suffix(suffix: &str) -> Result<()> {
    let ok = !suffix.is_empty()
        && suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidConfig(format!(
            "suffix {suffix:?} must be non-empty [A-Za-z0-9_-]"
        )))
    }
}
