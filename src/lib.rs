// src/lib.rs
//! envelope-file-crypto: client-side, zero-knowledge file encryption
//!
//! Features:
//! - RSA-2048 / RSA-4096 user key pairs, private half as password-encrypted PKCS#8
//! - Per-file AES-256-GCM keys, wrapped with RSA-OAEP for each recipient
//! - Streaming encryption and decryption in arbitrary-size chunks
//! - Wire-compatible version tags and JSON shapes
//! - Pluggable primitive provider with a deterministic mock

pub mod aliases;
pub mod cipher;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod error;
pub mod file_key;
pub mod key_pair;
pub mod model;
pub mod provider;
pub mod versions;

// Re-export everything users need at the crate root
pub use cipher::{decrypt_all, encrypt_all, DecryptionCipher, EncryptionCipher};
pub use config::load as load_config;
pub use crypto::Crypto;
pub use error::{CryptoError, ErrorKind, Result};
pub use model::{EncryptedFileKey, PlainFileKey, UserKeyPair, UserPrivateKey, UserPublicKey};
pub use provider::{CryptoProvider, MockCryptoProvider, RsaCryptoProvider};
pub use versions::{EncryptedFileKeyVersion, KeyPairVersion, PlainFileKeyVersion};
