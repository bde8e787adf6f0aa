// src/core/mod.rs
pub mod crypto;
pub mod envelope;
pub mod file;
pub mod layout;

pub use crypto::{open, seal};
pub use envelope::Envelope;
pub use layout::EntryLayout;
