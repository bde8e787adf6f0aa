// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Layout, Paths};
use crate::consts::{DEFAULT_ENTRY_SUFFIX, DEFAULT_MARKER_SUFFIX};

pub const DEFAULT_STORE_DIR_NAME: &str = "encrypted-secret-store";

/// Used when the platform has no data directory
pub const FALLBACK_STORE_DIR: &str = "secret-store";

pub fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(DEFAULT_STORE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_STORE_DIR))
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            entry_suffix: DEFAULT_ENTRY_SUFFIX.into(),
            marker_suffix: DEFAULT_MARKER_SUFFIX.into(),
        }
    }
}
