// src/model/mod.rs
//! Value objects exchanged with callers and peers
//!
//! Field names of the serialized forms are fixed for cross-implementation
//! compatibility (`publicKey`, `privateKey`, `key`, `version`, `iv`, `tag`).

mod file_key;
mod key_pair;

pub use file_key::{EncryptedFileKey, PlainFileKey};
pub use key_pair::{UserKeyPair, UserPrivateKey, UserPublicKey};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CryptoError, Result};

/// Decode a standard-base64 wire field, naming the field on failure
pub(crate) fn decode_b64(field: &'static str, value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|_| CryptoError::InvalidEncoding { field })
}

/// Decode a base64 wire field that must be exactly `N` bytes
pub(crate) fn decode_b64_exact<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N]> {
    let bytes = zeroize::Zeroizing::new(decode_b64(field, value)?);
    let actual = bytes.len();
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength {
            field,
            expected: N,
            actual,
        })
}

pub(crate) fn encode_b64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
