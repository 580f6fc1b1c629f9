// src/file_key.rs
//! File-key generation and RSA transport
//!
//! A file key leaves this process only wrapped, and only once its content has
//! been fully encrypted: wrapping requires the IV and tag, which then travel
//! next to the RSA ciphertext in [`EncryptedFileKey`].

use tracing::debug;

use crate::aliases::SecretBytes;
use crate::consts::FILE_KEY_LEN;
use crate::error::{CryptoError, Result};
use crate::model::{decode_b64, encode_b64, EncryptedFileKey, PlainFileKey, UserPrivateKey, UserPublicKey};
use crate::provider::CryptoProvider;
use crate::versions::{EncryptedFileKeyVersion, PlainFileKeyVersion};

/// Fresh key-only file key (32 random bytes, base64)
pub fn generate_file_key<P: CryptoProvider>(
    provider: &P,
    version: PlainFileKeyVersion,
) -> Result<PlainFileKey> {
    let raw = SecretBytes::new(provider.random_bytes(FILE_KEY_LEN)?);
    if raw.len() != FILE_KEY_LEN {
        return Err(CryptoError::RandomGenerationFailed);
    }

    debug!(%version, "file key generated");
    Ok(PlainFileKey::new(encode_b64(&raw), version))
}

/// Wrap `file_key` for the holder of `public_key`
///
/// Fails with [`CryptoError::IncompleteFileKey`] unless both IV and tag are set.
pub fn encrypt_file_key<P: CryptoProvider>(
    provider: &P,
    file_key: &PlainFileKey,
    public_key: &UserPublicKey,
) -> Result<EncryptedFileKey> {
    let (Some(iv), Some(tag)) = (file_key.iv(), file_key.tag()) else {
        return Err(CryptoError::IncompleteFileKey);
    };

    let raw = file_key.raw_key()?;
    let wrapped = provider.rsa_oaep_encrypt(&raw[..], &public_key.public_key, public_key.version)?;
    let version = EncryptedFileKeyVersion::compose(public_key.version, file_key.version());

    debug!(
        %version,
        recipient = %public_key.fingerprint(),
        "file key wrapped"
    );

    Ok(EncryptedFileKey::new(encode_b64(&wrapped), version, iv, tag))
}

/// Unwrap `encrypted` with `private_key`, unlocked by `password` for this call only
///
/// Wrong password, wrong key and corrupt ciphertext all surface as
/// [`CryptoError::FileKeyDecryptionFailed`].
pub fn decrypt_file_key<P: CryptoProvider>(
    provider: &P,
    encrypted: &EncryptedFileKey,
    private_key: &UserPrivateKey,
    password: &str,
) -> Result<PlainFileKey> {
    let wrapped = decode_b64("key", &encrypted.key)?;
    let key_pair_version = encrypted.key_pair_version();

    if private_key.version != key_pair_version {
        debug!(
            expected = %key_pair_version,
            actual = %private_key.version,
            "private key version differs from wrapped key"
        );
    }

    let raw = provider.rsa_oaep_decrypt(&wrapped, &private_key.private_key, password, key_pair_version)?;
    if raw.len() != FILE_KEY_LEN {
        return Err(CryptoError::FileKeyDecryptionFailed);
    }

    debug!(version = %encrypted.version, "file key unwrapped");

    Ok(PlainFileKey::from_parts(
        encode_b64(&raw),
        encrypted.file_key_version(),
        Some(encrypted.iv.clone()),
        Some(encrypted.tag.clone()),
    ))
}
