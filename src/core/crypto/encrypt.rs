// src/core/crypto/encrypt.rs
use rand::RngCore;

use super::cipher::EnvelopeCipher;
use crate::consts::NONCE_LEN;
use crate::core::envelope::Envelope;
use crate::error::Result;
use crate::key_ops::MasterKey;

/// Seal plaintext → envelope bytes (nonce ‖ tag ‖ ciphertext)
///
/// Every call draws a fresh random nonce from the thread-local CSPRNG.
pub fn seal(key: &MasterKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);

    let mut buffer = plaintext.to_vec();
    let tag = EnvelopeCipher::new(key)?.encrypt(&nonce, &mut buffer)?;
    Ok(Envelope::from_parts(nonce, tag, buffer).to_bytes())
}
