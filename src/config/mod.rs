// src/config/mod.rs
//! Configuration system for encrypted-secret-store
//!
//! TOML file + env overrides, falling back to built-in defaults.
//! Key material is never part of the config.

pub use app::{load, Config, Layout, Paths, Rotation};

mod app;
mod defaults;
