// src/core/crypto/mod.rs
//! Pure cryptographic operations — no I/O
//!
//! All functions work exclusively on in-memory buffers.
mod cipher;
mod decrypt;
mod encrypt;

pub use decrypt::open;
pub use encrypt::seal;
