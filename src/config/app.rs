// src/config/app.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{DEFAULT_CONFIG_FILE, ENV_CONFIG, ENV_STORE_DIR};
use crate::core::layout::EntryLayout;
use crate::enums::RecodeStrategy;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub layout: Layout,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Paths {
    pub store_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Layout {
    pub entry_suffix: String,
    pub marker_suffix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Rotation {
    pub strategy: RecodeStrategy,
}

impl Config {
    /// Parse and validate a TOML document; missing keys take defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let conf: Config = toml::from_str(text)?;
        conf.entry_layout()?;
        Ok(conf)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from a variable lookup (the process env in `load`)
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_STORE_DIR).filter(|d| !d.is_empty()) {
            self.paths.store_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn entry_layout(&self) -> Result<EntryLayout> {
        EntryLayout::new(&self.layout.entry_suffix, &self.layout.marker_suffix)
    }
}

/// Load config: `$ESS_CONFIG` (or `secret-store.toml`), else defaults, then env overrides
pub fn load() -> Result<Config> {
    let explicit = std::env::var(ENV_CONFIG).ok();
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    let conf = if Path::new(&config_path).exists() {
        debug!(path = %config_path, "loading config");
        Config::load_from(&config_path)?
    } else {
        if explicit.is_some() {
            warn!(path = %config_path, "config file not found — using built-in defaults");
        }
        Config::default()
    };

    Ok(conf.with_overrides(|var| std::env::var(var).ok()))
}
