// src/cipher.rs
//! Per-file streaming cipher sessions
//!
//! A session is opened for one file key, fed chunks in file order, and
//! consumed by `finalize`. Chunk boundaries are free: any split of the same
//! byte stream gives the same ciphertext and tag.
//!
//! Output of [`DecryptionCipher::process_block`] is **unauthenticated** until
//! [`DecryptionCipher::finalize`] returns `Ok`. Callers that cannot hold it
//! back (for example, when writing straight to the destination file) must
//! discard what they wrote if finalization fails. [`decrypt_all`] does the
//! holding back for in-memory buffers.

use tracing::debug;

use crate::aliases::SecretBytes;
use crate::consts::IV_LEN;
use crate::error::{CryptoError, Result};
use crate::model::{encode_b64, PlainFileKey};
use crate::provider::{CryptoProvider, GcmDecryptContext, GcmEncryptContext};

/// Encryption session; owns its file key until `finalize` hands it back with the tag
pub struct EncryptionCipher<C: GcmEncryptContext> {
    file_key: PlainFileKey,
    context: C,
    processed: u64,
}

impl<C: GcmEncryptContext> EncryptionCipher<C> {
    /// Draw a fresh IV, store it on `file_key` and open the GCM context
    pub fn begin<P>(provider: &P, mut file_key: PlainFileKey) -> Result<Self>
    where
        P: CryptoProvider<EncryptContext = C>,
    {
        let key = file_key.raw_key()?;
        let iv: [u8; IV_LEN] = provider
            .random_bytes(IV_LEN)?
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::RandomGenerationFailed)?;

        let context = provider.open_gcm_encrypt_context(&key[..], &iv)?;
        file_key.set_iv(encode_b64(&iv));

        debug!(version = %file_key.version(), "encryption cipher created");
        Ok(Self {
            file_key,
            context,
            processed: 0,
        })
    }

    /// The key this session encrypts with; its IV is already set
    pub fn file_key(&self) -> &PlainFileKey {
        &self.file_key
    }

    /// Encrypt the next chunk; output has the same length as `plain`
    pub fn process_block(&mut self, plain: &[u8]) -> Result<Vec<u8>> {
        let out = self.context.update(plain)?;
        self.processed += plain.len() as u64;
        Ok(out)
    }

    /// Close the session and return the file key with its tag set
    pub fn finalize(self) -> Result<PlainFileKey> {
        let tag = self
            .context
            .finish()
            .map_err(|e| CryptoError::FinalizationFailed(e.to_string()))?;

        let mut file_key = self.file_key;
        file_key.set_tag(encode_b64(&tag));

        debug!(bytes = self.processed, "encryption cipher finalized");
        Ok(file_key)
    }
}

/// Decryption session bound to the IV and expected tag of a complete file key
pub struct DecryptionCipher<C: GcmDecryptContext> {
    context: C,
    processed: u64,
}

impl<C: GcmDecryptContext> DecryptionCipher<C> {
    pub fn begin<P>(provider: &P, file_key: &PlainFileKey) -> Result<Self>
    where
        P: CryptoProvider<DecryptContext = C>,
    {
        let iv = file_key.raw_iv().ok_or(CryptoError::MissingIv)??;
        let tag = file_key.raw_tag().ok_or(CryptoError::MissingTag)??;
        let key = file_key.raw_key()?;

        let context = provider.open_gcm_decrypt_context(&key[..], &iv, &tag)?;

        debug!(version = %file_key.version(), "decryption cipher created");
        Ok(Self {
            context,
            processed: 0,
        })
    }

    /// Decrypt the next chunk. Not authenticated until [`Self::finalize`] succeeds.
    ///
    /// The chunk is wiped when the returned buffer drops.
    pub fn process_block(&mut self, cipher: &[u8]) -> Result<SecretBytes> {
        let out = SecretBytes::new(self.context.update(cipher)?);
        self.processed += cipher.len() as u64;
        Ok(out)
    }

    /// Verify the tag over everything processed
    pub fn finalize(self) -> Result<()> {
        let processed = self.processed;
        self.context.finish()?;
        debug!(bytes = processed, "decryption cipher finalized");
        Ok(())
    }
}

/// Encrypt a whole buffer in `chunk_size` pieces
///
/// Returns the ciphertext and the file key with IV and tag set.
pub fn encrypt_all<P: CryptoProvider>(
    provider: &P,
    file_key: PlainFileKey,
    plain: &[u8],
    chunk_size: usize,
) -> Result<(Vec<u8>, PlainFileKey)> {
    let mut cipher = EncryptionCipher::<P::EncryptContext>::begin(provider, file_key)?;
    let mut out = Vec::with_capacity(plain.len());
    for chunk in plain.chunks(chunk_size.max(1)) {
        out.extend(cipher.process_block(chunk)?);
    }
    Ok((out, cipher.finalize()?))
}

/// Decrypt a whole buffer; plaintext is returned only once the tag verifies
pub fn decrypt_all<P: CryptoProvider>(
    provider: &P,
    file_key: &PlainFileKey,
    cipher_text: &[u8],
    chunk_size: usize,
) -> Result<Vec<u8>> {
    let mut cipher = DecryptionCipher::<P::DecryptContext>::begin(provider, file_key)?;
    let mut out = SecretBytes::new(Vec::with_capacity(cipher_text.len()));
    for chunk in cipher_text.chunks(chunk_size.max(1)) {
        out.extend_from_slice(&cipher.process_block(chunk)?);
    }
    cipher.finalize()?;
    Ok(std::mem::take(&mut *out))
}
