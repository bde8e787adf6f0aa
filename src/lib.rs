// src/lib.rs
//! encrypted-secret-store — named secrets sealed at rest under one master key
//!
//! Features:
//! - AES-GCM envelopes (nonce ‖ tag ‖ ciphertext), 128/192/256-bit keys
//! - One file per entry, atomic replace on write
//! - Candidate-key resolution through a sealed check marker
//! - Directory-wide key rotation (`recode`), staged or in place

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod enums;
pub mod key_ops;
pub mod payload;
pub mod rotate_keys;
pub mod store;

pub mod error;

// Re-export everything users need at the crate root
pub use config::{load as load_config, Config};
pub use crate::core::{open, seal, EntryLayout, Envelope};
pub use enums::{KeySize, RecodeStrategy};
pub use error::{Result, StoreError};
pub use key_ops::{KeyRepr, MasterKey};
pub use rotate_keys::RecodeReport;
pub use store::Store;
