// src/model/file_key.rs
//! Plain and RSA-wrapped file keys

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::aliases::RawFileKey;
use crate::consts::{FILE_KEY_LEN, IV_LEN, TAG_LEN};
use crate::error::Result;
use crate::model::decode_b64_exact;
use crate::versions::{EncryptedFileKeyVersion, KeyPairVersion, PlainFileKeyVersion};

/// Symmetric file key (base64) with the IV and tag of the content it protects
///
/// `iv` is set when an encryption cipher is created for this key and `tag`
/// when that cipher finalizes. A key without both is "key-only": it can start
/// an encryption, but it can neither be wrapped nor used for decryption.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainFileKey {
    key: String,
    version: PlainFileKeyVersion,
    #[serde(default)]
    iv: Option<String>,
    #[serde(default)]
    tag: Option<String>,
}

impl PlainFileKey {
    /// Key-only file key, as produced by file-key generation
    pub fn new(key: impl Into<String>, version: PlainFileKeyVersion) -> Self {
        Self {
            key: key.into(),
            version,
            iv: None,
            tag: None,
        }
    }

    /// Reassemble a stored file key
    pub fn from_parts(
        key: impl Into<String>,
        version: PlainFileKeyVersion,
        iv: Option<String>,
        tag: Option<String>,
    ) -> Self {
        Self {
            key: key.into(),
            version,
            iv,
            tag,
        }
    }

    /// Base64 of the raw symmetric key
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn version(&self) -> PlainFileKeyVersion {
        self.version
    }

    pub fn iv(&self) -> Option<&str> {
        self.iv.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Both IV and tag are present
    pub fn is_complete(&self) -> bool {
        self.iv.is_some() && self.tag.is_some()
    }

    pub(crate) fn set_iv(&mut self, iv: String) {
        self.iv = Some(iv);
    }

    pub(crate) fn set_tag(&mut self, tag: String) {
        self.tag = Some(tag);
    }

    pub(crate) fn raw_key(&self) -> Result<RawFileKey> {
        Ok(RawFileKey::new(decode_b64_exact::<FILE_KEY_LEN>(
            "key", &self.key,
        )?))
    }

    pub(crate) fn raw_iv(&self) -> Option<Result<[u8; IV_LEN]>> {
        self.iv.as_deref().map(|iv| decode_b64_exact::<IV_LEN>("iv", iv))
    }

    pub(crate) fn raw_tag(&self) -> Option<Result<[u8; TAG_LEN]>> {
        self.tag.as_deref().map(|tag| decode_b64_exact::<TAG_LEN>("tag", tag))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Drop for PlainFileKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl fmt::Debug for PlainFileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainFileKey")
            .field("key", &"<redacted>")
            .field("version", &self.version)
            .field("iv", &self.iv)
            .field("tag", &self.tag)
            .finish()
    }
}

/// File key wrapped with a recipient's RSA public key
///
/// `iv` and `tag` travel next to the RSA ciphertext unchanged: they belong to
/// the symmetric layer, not to the asymmetric transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedFileKey {
    pub key: String,
    pub version: EncryptedFileKeyVersion,
    pub iv: String,
    pub tag: String,
}

impl EncryptedFileKey {
    pub fn new(
        key: impl Into<String>,
        version: EncryptedFileKeyVersion,
        iv: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            version,
            iv: iv.into(),
            tag: tag.into(),
        }
    }

    pub fn key_pair_version(&self) -> KeyPairVersion {
        self.version.key_pair_version()
    }

    pub fn file_key_version(&self) -> PlainFileKeyVersion {
        self.version.plain_file_key_version()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
