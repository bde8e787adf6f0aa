// src/aliases.rs
//! Re-exports secure-gate's secret wrappers
//!
//! Key bytes never travel outside one of these types.

pub use secure_gate::dynamic_alias;

// Raw master key bytes (16, 24 or 32 long) — zeroized on drop
dynamic_alias!(KeyMaterial, Vec<u8>);
