// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the user-visible choices: cipher strength
//! (derived from key length) and the recode strategy.

use serde::{Deserialize, Serialize};

/// AES strength, selected purely by master key length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Map a raw key length onto a cipher variant; `None` for anything but 16/24/32
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128),
            24 => Some(Self::Aes192),
            32 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Key length in bytes
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Key strength in bits
    pub const fn bits(self) -> usize {
        self.byte_len() * 8
    }
}

/// How `Store::recode` rewrites the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RecodeStrategy {
    /// Re-seal everything into staging files first, then rename into place.
    /// A failure before the rename pass leaves the directory untouched.
    #[default]
    Staged,
    /// Overwrite each entry as it is visited. A failure mid-scan leaves
    /// a mixed-key directory.
    InPlace,
}
