// src/key_ops.rs
//! Master key validation, generation and representation utilities
//!
//! A `MasterKey` can only be built from 16, 24 or 32 bytes, so every
//! cryptographic call downstream works on an already-validated key.

use std::fmt;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::RngCore;

use crate::aliases::KeyMaterial;
use crate::consts::FINGERPRINT_LEN_HEX;
use crate::enums::KeySize;
use crate::error::{Result, StoreError};

/// Validated symmetric master key — zeroized on drop
pub struct MasterKey {
    material: KeyMaterial,
    size: KeySize,
}

impl MasterKey {
    /// Wrap raw key bytes, rejecting any length other than 16, 24 or 32
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let bytes = bytes.as_ref();
        let size = KeySize::from_len(bytes.len()).ok_or(StoreError::InvalidKeySize {
            actual: bytes.len(),
        })?;
        Ok(Self {
            material: KeyMaterial::new(bytes.to_vec()),
            size,
        })
    }

    /// Generate a fresh random key of the requested strength
    pub fn generate(size: KeySize) -> Self {
        let mut bytes = vec![0u8; size.byte_len()];
        rand::rng().fill_bytes(&mut bytes);
        Self {
            material: KeyMaterial::new(bytes),
            size,
        }
    }

    /// Parse a hex-encoded key
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| StoreError::InvalidKeyEncoding(format!("hex: {e}")))?;
        Self::new(bytes)
    }

    /// Parse a standard (padded) base64 key
    pub fn from_base64(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| StoreError::InvalidKeyEncoding(format!("base64: {e}")))?;
        Self::new(bytes)
    }

    pub fn size(&self) -> KeySize {
        self.size
    }

    /// Raw key bytes. Avoid logging or persisting the returned slice.
    pub fn expose_secret(&self) -> &[u8] {
        self.material.expose_secret().as_slice()
    }

    /// Short BLAKE3-derived identifier, safe to log
    pub fn fingerprint(&self) -> String {
        let mut hex = blake3::hash(self.expose_secret()).to_hex().to_string();
        hex.truncate(FINGERPRINT_LEN_HEX);
        hex
    }

    pub fn representations(&self) -> KeyRepr {
        KeyRepr {
            hex: hex::encode(self.expose_secret()),
            base64: STANDARD.encode(self.expose_secret()),
            base64url_no_pad: URL_SAFE_NO_PAD.encode(self.expose_secret()),
        }
    }
}

impl Clone for MasterKey {
    fn clone(&self) -> Self {
        Self {
            material: KeyMaterial::new(self.expose_secret().to_vec()),
            size: self.size,
        }
    }
}

impl PartialEq for MasterKey {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.expose_secret() == other.expose_secret()
    }
}

impl Eq for MasterKey {}

impl AsRef<[u8]> for MasterKey {
    fn as_ref(&self) -> &[u8] {
        self.expose_secret()
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterKey")
            .field("size", &self.size)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Multiple string representations of a key for export/display
#[derive(Debug, Clone)]
pub struct KeyRepr {
    pub hex: String,
    pub base64: String,
    pub base64url_no_pad: String,
}
