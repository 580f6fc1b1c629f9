// src/config/app.rs
use super::defaults::*;
use crate::consts::{CONFIG_ENV_VAR, PBKDF2_ITERATIONS_ENV_VAR};
use crate::versions::KeyPairVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crypto: CryptoSettings,
    pub stream: StreamSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoSettings {
    /// PBKDF2 rounds protecting newly generated private keys
    pub pbkdf2_iterations: u32,
    /// Strength used when a caller does not pick one
    pub key_pair_version: KeyPairVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    /// Block size for chunked file processing
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crypto: default_crypto(),
            stream: default_stream(),
        }
    }
}

impl Default for CryptoSettings {
    fn default() -> Self {
        default_crypto()
    }
}

impl Default for StreamSettings {
    fn default() -> Self {
        default_stream()
    }
}

impl Config {
    /// Parse a TOML document; absent keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut conf: Config = toml::from_str(content)?;
        conf.normalize();
        Ok(conf)
    }

    /// Zero is never a usable value for either knob
    fn normalize(&mut self) {
        if self.crypto.pbkdf2_iterations == 0 {
            warn!("pbkdf2_iterations = 0 in config, using default");
            self.crypto.pbkdf2_iterations = default_crypto().pbkdf2_iterations;
        }
        if self.stream.chunk_size == 0 {
            warn!("chunk_size = 0 in config, using default");
            self.stream.chunk_size = default_stream().chunk_size;
        }
    }

    fn apply_env_overrides(&mut self) {
        let Ok(raw) = std::env::var(PBKDF2_ITERATIONS_ENV_VAR) else {
            return;
        };
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => self.crypto.pbkdf2_iterations = n,
            _ => warn!("Ignoring invalid {PBKDF2_ITERATIONS_ENV_VAR}={raw}"),
        }
    }
}

/// Read and parse one config file
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Config::from_toml_str(&content)
}

fn config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => Some(PathBuf::from(path)),
        None => dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)),
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config at first use; falls back to defaults if missing or broken
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let mut conf = match config_path() {
            Some(path) if path.exists() => match load_from(&path) {
                Ok(conf) => {
                    debug!("Loaded config from {}", path.display());
                    conf
                }
                Err(e) => {
                    warn!("{e} ({}), using built-in defaults", path.display());
                    Config::default()
                }
            },
            _ => {
                debug!("No config file found, using built-in defaults");
                Config::default()
            }
        };

        conf.apply_env_overrides();
        conf
    })
}
