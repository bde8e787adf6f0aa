// src/core/envelope.rs
//! On-disk envelope layout
//!
//! ```text
//! offset 0..16   : nonce
//! offset 16..32  : authentication tag
//! offset 32..end : ciphertext (same length as the plaintext)
//! ```

use crate::consts::{HEADER_LEN, NONCE_LEN, TAG_LEN};
use crate::error::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    nonce: [u8; NONCE_LEN],
    tag: [u8; TAG_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn from_parts(nonce: [u8; NONCE_LEN], tag: [u8; TAG_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            nonce,
            tag,
            ciphertext,
        }
    }

    /// Split raw bytes into nonce, tag and ciphertext
    ///
    /// Fails with `MalformedEnvelope` when the input cannot hold the 32-byte header.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let malformed = || StoreError::MalformedEnvelope { len: bytes.len() };
        let (nonce, rest) = bytes.split_first_chunk::<NONCE_LEN>().ok_or_else(malformed)?;
        let (tag, ciphertext) = rest.split_first_chunk::<TAG_LEN>().ok_or_else(malformed)?;
        Ok(Self {
            nonce: *nonce,
            tag: *tag,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Serialize as nonce ‖ tag ‖ ciphertext
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    pub fn tag(&self) -> &[u8; TAG_LEN] {
        &self.tag
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn into_parts(self) -> ([u8; NONCE_LEN], [u8; TAG_LEN], Vec<u8>) {
        (self.nonce, self.tag, self.ciphertext)
    }
}
