// src/aliases.rs
//! Zeroizing secret buffers
//!
//! These are the canonical secret types used throughout envelope-file-crypto.

use zeroize::Zeroizing;

use crate::consts::FILE_KEY_LEN;

/// Arbitrary-length secret bytes (decrypted RSA output, plaintext chunks)
pub type SecretBytes = Zeroizing<Vec<u8>>;

/// Raw 256-bit AES file key
pub type RawFileKey = Zeroizing<[u8; FILE_KEY_LEN]>;

/// Password string held only as long as an operation needs it
pub type Password = Zeroizing<String>;
