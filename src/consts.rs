// src/consts.rs
//! Shared constants: wire-level sizes and defaults

/// AES-256 file key length in bytes
pub const FILE_KEY_LEN: usize = 32;

/// GCM initialization vector length (96-bit IV → J0 = IV || 0^31 || 1)
pub const IV_LEN: usize = 12;

/// GCM authentication tag length
pub const TAG_LEN: usize = 16;

/// Largest plaintext a single GCM session may process (2^36 - 32 bytes)
pub const GCM_MAX_MESSAGE_LEN: u64 = (1 << 36) - 32;

/// RSA public exponent used for every generated key pair
pub const RSA_PUBLIC_EXPONENT: u64 = 65_537;

/// PBKDF2-HMAC-SHA256 iterations protecting the PKCS#8 private key
// Matches what current peers write; decoding accepts any count.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 1_300_000;

/// PBKDF2 salt length for encrypted PKCS#8
pub const PBKDF2_SALT_LEN: usize = 16;

/// AES-256-CBC IV length for encrypted PKCS#8
pub const PKCS8_AES_IV_LEN: usize = 16;

/// Default block size for callers that chunk file content
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Hex characters of the BLAKE3 public-key fingerprint shown in logs
pub const FINGERPRINT_HEX_LEN: usize = 16;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "EFC_CONFIG";

/// Environment variable overriding the PBKDF2 iteration count
pub const PBKDF2_ITERATIONS_ENV_VAR: &str = "EFC_PBKDF2_ITERATIONS";
