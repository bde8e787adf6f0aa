// src/core/crypto/cipher.rs
//! AES-GCM instance selected once from the key's `KeySize`
//!
//! Nonces are 16 bytes rather than GCM's usual 12, so the counter block is
//! derived through GHASH. Stores written by other GCM implementations with
//! a 16-byte IV open unchanged.

use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::AesGcm;

use crate::consts::{NONCE_LEN, TAG_LEN};
use crate::enums::KeySize;
use crate::error::{Result, StoreError};
use crate::key_ops::MasterKey;

/// Associated data is always empty
const NO_AAD: &[u8] = b"";

type Gcm<A> = AesGcm<A, U16>;

pub(crate) enum EnvelopeCipher {
    Aes128(Gcm<Aes128>),
    Aes192(Gcm<Aes192>),
    Aes256(Gcm<Aes256>),
}

impl EnvelopeCipher {
    pub(crate) fn new(key: &MasterKey) -> Result<Self> {
        let bytes = key.expose_secret();
        let bad_len = |_| StoreError::InvalidKeySize {
            actual: bytes.len(),
        };
        let cipher = match key.size() {
            KeySize::Aes128 => Self::Aes128(Gcm::new_from_slice(bytes).map_err(bad_len)?),
            KeySize::Aes192 => Self::Aes192(Gcm::new_from_slice(bytes).map_err(bad_len)?),
            KeySize::Aes256 => Self::Aes256(Gcm::new_from_slice(bytes).map_err(bad_len)?),
        };
        Ok(cipher)
    }

    /// Encrypt `buffer` in place and return the detached tag
    pub(crate) fn encrypt(
        &self,
        nonce: &[u8; NONCE_LEN],
        buffer: &mut [u8],
    ) -> Result<[u8; TAG_LEN]> {
        let nonce = GenericArray::from_slice(nonce.as_slice());
        let tag = match self {
            Self::Aes128(c) => c.encrypt_in_place_detached(nonce, NO_AAD, buffer),
            Self::Aes192(c) => c.encrypt_in_place_detached(nonce, NO_AAD, buffer),
            Self::Aes256(c) => c.encrypt_in_place_detached(nonce, NO_AAD, buffer),
        }
        .map_err(|_| StoreError::SealFailed)?;

        let mut out = [0u8; TAG_LEN];
        out.copy_from_slice(&tag);
        Ok(out)
    }

    /// Verify `tag` and decrypt `buffer` in place
    ///
    /// The buffer is only decrypted once the tag matches.
    pub(crate) fn decrypt(
        &self,
        nonce: &[u8; NONCE_LEN],
        tag: &[u8; TAG_LEN],
        buffer: &mut [u8],
    ) -> Result<()> {
        let nonce = GenericArray::from_slice(nonce.as_slice());
        let tag = GenericArray::from_slice(tag.as_slice());
        match self {
            Self::Aes128(c) => c.decrypt_in_place_detached(nonce, NO_AAD, buffer, tag),
            Self::Aes192(c) => c.decrypt_in_place_detached(nonce, NO_AAD, buffer, tag),
            Self::Aes256(c) => c.decrypt_in_place_detached(nonce, NO_AAD, buffer, tag),
        }
        .map_err(|_| StoreError::Integrity)
    }
}
