// src/config/mod.rs
//! Configuration for envelope-file-crypto
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, load_from, Config, ConfigError, CryptoSettings, StreamSettings};

mod app;
mod defaults;
