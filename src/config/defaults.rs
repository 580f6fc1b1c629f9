// src/config/defaults.rs
use crate::config::app::{CryptoSettings, StreamSettings};
use crate::consts::{DEFAULT_CHUNK_SIZE, DEFAULT_PBKDF2_ITERATIONS};
use crate::versions::KeyPairVersion;

pub const CONFIG_DIR_NAME: &str = "envelope-file-crypto";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub fn default_crypto() -> CryptoSettings {
    CryptoSettings {
        pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
        key_pair_version: KeyPairVersion::Rsa4096,
    }
}

pub fn default_stream() -> StreamSettings {
    StreamSettings {
        chunk_size: DEFAULT_CHUNK_SIZE,
    }
}
