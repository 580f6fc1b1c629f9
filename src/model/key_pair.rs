// src/model/key_pair.rs
//! User key-pair containers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::FINGERPRINT_HEX_LEN;
use crate::error::Result;
use crate::versions::KeyPairVersion;

/// PEM-encoded RSA public key (SPKI) tagged with its key-pair version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublicKey {
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub version: KeyPairVersion,
}

impl UserPublicKey {
    pub fn new(public_key: impl Into<String>, version: KeyPairVersion) -> Self {
        Self {
            public_key: public_key.into(),
            version,
        }
    }

    /// Short BLAKE3 digest of the PEM, safe to put in logs
    pub fn fingerprint(&self) -> String {
        let mut hex = blake3::hash(self.public_key.as_bytes()).to_hex().to_string();
        hex.truncate(FINGERPRINT_HEX_LEN);
        hex
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Password-encrypted PKCS#8 PEM private key tagged with its key-pair version
///
/// The PEM is never decrypted into a standalone value; the provider unlocks
/// it inside each RSA operation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrivateKey {
    #[serde(rename = "privateKey")]
    pub private_key: String,
    pub version: KeyPairVersion,
}

impl UserPrivateKey {
    pub fn new(private_key: impl Into<String>, version: KeyPairVersion) -> Self {
        Self {
            private_key: private_key.into(),
            version,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Debug for UserPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPrivateKey")
            .field("private_key", &"<redacted>")
            .field("version", &self.version)
            .finish()
    }
}

/// Both halves of a user's key pair
///
/// Created in one step by key-pair generation, with equal version tags.
/// The fields are public so stored halves can be reassembled; pairing
/// containers of different versions makes [`crate::key_pair::check_user_key_pair`]
/// return `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserKeyPair {
    #[serde(rename = "publicKeyContainer")]
    pub public_key_container: UserPublicKey,
    #[serde(rename = "privateKeyContainer")]
    pub private_key_container: UserPrivateKey,
}

impl UserKeyPair {
    pub fn new(public_key: UserPublicKey, private_key: UserPrivateKey) -> Self {
        Self {
            public_key_container: public_key,
            private_key_container: private_key,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
