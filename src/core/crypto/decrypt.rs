// src/core/crypto/decrypt.rs
use super::cipher::EnvelopeCipher;
use crate::core::envelope::Envelope;
use crate::error::Result;
use crate::key_ops::MasterKey;

/// Open envelope bytes → plaintext
///
/// Returns `Integrity` on a wrong key or any altered bit and
/// `MalformedEnvelope` on inputs shorter than the header. No plaintext
/// leaves this function unless the tag verified.
pub fn open(key: &MasterKey, envelope: &[u8]) -> Result<Vec<u8>> {
    let (nonce, tag, mut buffer) = Envelope::parse(envelope)?.into_parts();
    EnvelopeCipher::new(key)?.decrypt(&nonce, &tag, &mut buffer)?;
    Ok(buffer)
}
