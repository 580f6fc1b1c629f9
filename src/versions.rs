// src/versions.rs
//! Version registry: the closed set of key-pair, file-key and
//! encrypted-file-key versions, and the mapping between them.
//!
//! The string literals are part of the wire contract shared with every other
//! implementation of this scheme. New variants get new literals; `"A"` is
//! never reused.
//!
//! The composite mapping is an exhaustive `match`, so adding an RSA size or a
//! symmetric algorithm fails to compile until every combination is decided.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};

/// Strength of a user's RSA key pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyPairVersion {
    #[serde(rename = "A")]
    Rsa2048,
    #[serde(rename = "RSA-4096")]
    Rsa4096,
}

impl KeyPairVersion {
    pub const ALL: [KeyPairVersion; 2] = [KeyPairVersion::Rsa2048, KeyPairVersion::Rsa4096];

    /// RSA modulus size, used only at generation time
    pub const fn modulus_bits(self) -> usize {
        match self {
            KeyPairVersion::Rsa2048 => 2048,
            KeyPairVersion::Rsa4096 => 4096,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            KeyPairVersion::Rsa2048 => "A",
            KeyPairVersion::Rsa4096 => "RSA-4096",
        }
    }
}

/// Symmetric algorithm of a plain file key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlainFileKeyVersion {
    #[serde(rename = "A")]
    Aes256Gcm,
}

impl PlainFileKeyVersion {
    pub const ALL: [PlainFileKeyVersion; 1] = [PlainFileKeyVersion::Aes256Gcm];

    pub const fn as_str(self) -> &'static str {
        match self {
            PlainFileKeyVersion::Aes256Gcm => "A",
        }
    }
}

/// Composite of the recipient's key-pair version and the file-key version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncryptedFileKeyVersion {
    #[serde(rename = "A")]
    Rsa2048Aes256Gcm,
    #[serde(rename = "RSA-4096/AES-256-GCM")]
    Rsa4096Aes256Gcm,
}

impl EncryptedFileKeyVersion {
    pub const ALL: [EncryptedFileKeyVersion; 2] = [
        EncryptedFileKeyVersion::Rsa2048Aes256Gcm,
        EncryptedFileKeyVersion::Rsa4096Aes256Gcm,
    ];

    /// Forward mapping (key pair, file key) → composite. Total and injective.
    pub const fn compose(
        key_pair: KeyPairVersion,
        file_key: PlainFileKeyVersion,
    ) -> EncryptedFileKeyVersion {
        match (key_pair, file_key) {
            (KeyPairVersion::Rsa2048, PlainFileKeyVersion::Aes256Gcm) => {
                EncryptedFileKeyVersion::Rsa2048Aes256Gcm
            }
            (KeyPairVersion::Rsa4096, PlainFileKeyVersion::Aes256Gcm) => {
                EncryptedFileKeyVersion::Rsa4096Aes256Gcm
            }
        }
    }

    pub const fn key_pair_version(self) -> KeyPairVersion {
        match self {
            EncryptedFileKeyVersion::Rsa2048Aes256Gcm => KeyPairVersion::Rsa2048,
            EncryptedFileKeyVersion::Rsa4096Aes256Gcm => KeyPairVersion::Rsa4096,
        }
    }

    pub const fn plain_file_key_version(self) -> PlainFileKeyVersion {
        match self {
            EncryptedFileKeyVersion::Rsa2048Aes256Gcm
            | EncryptedFileKeyVersion::Rsa4096Aes256Gcm => PlainFileKeyVersion::Aes256Gcm,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EncryptedFileKeyVersion::Rsa2048Aes256Gcm => "A",
            EncryptedFileKeyVersion::Rsa4096Aes256Gcm => "RSA-4096/AES-256-GCM",
        }
    }
}

macro_rules! wire_literal_impls {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CryptoError;

            fn from_str(s: &str) -> Result<Self> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| CryptoError::unknown_version($kind, s))
            }
        }
    };
}

wire_literal_impls!(KeyPairVersion, "key pair");
wire_literal_impls!(PlainFileKeyVersion, "file key");
wire_literal_impls!(EncryptedFileKeyVersion, "encrypted file key");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_and_inverse_agree_for_every_combination() {
        for kp in KeyPairVersion::ALL {
            for fk in PlainFileKeyVersion::ALL {
                let efk = EncryptedFileKeyVersion::compose(kp, fk);
                assert_eq!(efk.key_pair_version(), kp);
                assert_eq!(efk.plain_file_key_version(), fk);
            }
        }
    }

    #[test]
    fn compose_is_injective() {
        let mut seen = std::collections::HashSet::new();
        for kp in KeyPairVersion::ALL {
            for fk in PlainFileKeyVersion::ALL {
                assert!(seen.insert(EncryptedFileKeyVersion::compose(kp, fk)));
            }
        }
        assert_eq!(seen.len(), EncryptedFileKeyVersion::ALL.len());
    }

    #[test]
    fn unknown_literal_is_rejected() {
        let err = "Z".parse::<KeyPairVersion>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown key pair version: Z");
        assert!("rsa-4096".parse::<KeyPairVersion>().is_err());
        assert!("".parse::<EncryptedFileKeyVersion>().is_err());
    }
}
