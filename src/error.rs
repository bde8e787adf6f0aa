// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid key size: {actual} bytes (expected 16, 24 or 32)")]
    InvalidKeySize { actual: usize },

    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("integrity check failed: wrong key or tampered envelope")]
    Integrity,

    #[error("encryption failed")]
    SealFailed,

    #[error("malformed envelope: {len} bytes is shorter than the 32-byte header")]
    MalformedEnvelope { len: usize },

    #[error("none of the {candidates} candidate key(s) opens the check marker")]
    NoMatchingKey { candidates: usize },

    #[error("no candidate key supplied for a fresh store")]
    NoCandidateKeys,

    #[error("invalid entry name: {0:?}")]
    InvalidEntryName(String),

    #[error("payload encoding failed: {0}")]
    PayloadEncoding(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Absence of an entry — expected and recoverable
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Tag mismatch: wrong key or tampered bytes — security relevant
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, StoreError::Integrity)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
