// src/provider/gcm.rs
//! Streaming AES-256-GCM
//!
//! One-shot AEAD APIs need the whole message in memory. Files do not fit that
//! shape, so the mode is assembled here from its parts: AES-256 in 32-bit
//! big-endian counter mode for confidentiality and GHASH over the ciphertext
//! for the tag. Output is byte-identical to one-shot AES-256-GCM with empty
//! associated data over the concatenated chunks.

use aes::cipher::{BlockEncrypt, KeyInit, KeyIvInit, StreamCipher};
use aes::Aes256;
use ghash::universal_hash::UniversalHash;
use ghash::GHash;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::consts::{FILE_KEY_LEN, GCM_MAX_MESSAGE_LEN, IV_LEN, TAG_LEN};
use crate::error::{CryptoError, Result};
use crate::provider::{GcmDecryptContext, GcmEncryptContext};

const BLOCK_LEN: usize = 16;

type Aes256Ctr = ctr::Ctr32BE<Aes256>;

/// Shared state of both directions: keystream, running GHASH, tag mask
struct GcmCore {
    ctr: Aes256Ctr,
    ghash: GHash,
    tag_mask: Zeroizing<[u8; BLOCK_LEN]>,
    pending: Zeroizing<[u8; BLOCK_LEN]>,
    pending_len: usize,
    processed: u64,
}

impl GcmCore {
    fn new(key: &[u8], iv: &[u8; IV_LEN]) -> Result<Self> {
        let cipher = Aes256::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
            field: "key",
            expected: FILE_KEY_LEN,
            actual: key.len(),
        })?;

        let mut h = ghash::Key::default();
        cipher.encrypt_block(&mut h);
        let ghash = GHash::new(&h);
        h.as_mut_slice().zeroize();

        // 96-bit IV: J0 = IV || 0^31 || 1
        let mut j0 = [0u8; BLOCK_LEN];
        j0[..IV_LEN].copy_from_slice(iv);
        j0[BLOCK_LEN - 1] = 1;

        let mut ctr = Aes256Ctr::new_from_slices(key, &j0)
            .map_err(|e| CryptoError::CipherInitFailed(e.to_string()))?;

        // E(K, J0) masks the tag; the counter then continues at J0 + 1
        let mut tag_mask = Zeroizing::new([0u8; BLOCK_LEN]);
        ctr.try_apply_keystream(&mut tag_mask[..])
            .map_err(|e| CryptoError::CipherInitFailed(e.to_string()))?;

        Ok(Self {
            ctr,
            ghash,
            tag_mask,
            pending: Zeroizing::new([0u8; BLOCK_LEN]),
            pending_len: 0,
            processed: 0,
        })
    }

    /// Running length after `len` more bytes; committed by the caller once they are through
    fn reserve(&self, len: usize) -> Result<u64> {
        self.processed
            .checked_add(len as u64)
            .filter(|&total| total <= GCM_MAX_MESSAGE_LEN)
            .ok_or(CryptoError::SessionTooLong)
    }

    fn keystream(&mut self, buf: &mut [u8]) -> Result<()> {
        self.ctr
            .try_apply_keystream(buf)
            .map_err(|_| CryptoError::SessionTooLong)
    }

    /// Feed ciphertext to GHASH, carrying partial blocks across calls
    fn absorb(&mut self, mut data: &[u8]) {
        if self.pending_len > 0 {
            let take = (BLOCK_LEN - self.pending_len).min(data.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];

            if self.pending_len < BLOCK_LEN {
                return;
            }
            self.ghash
                .update(&[*ghash::Block::from_slice(&self.pending[..])]);
            self.pending_len = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            self.ghash.update(&[*ghash::Block::from_slice(block)]);
        }

        let rest = blocks.remainder();
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();
    }

    fn tag(mut self) -> [u8; TAG_LEN] {
        self.ghash.update_padded(&self.pending[..self.pending_len]);

        // len(A) = 0 || len(C), both in bits
        let mut lengths = ghash::Block::default();
        lengths[8..].copy_from_slice(&(self.processed * 8).to_be_bytes());
        self.ghash.update(&[lengths]);

        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&self.ghash.finalize());
        for (t, m) in tag.iter_mut().zip(self.tag_mask.iter()) {
            *t ^= m;
        }
        tag
    }
}

/// Encrypting half of the streaming engine
pub struct GcmEncryptor {
    core: GcmCore,
}

impl GcmEncryptor {
    pub fn new(key: &[u8], iv: &[u8; IV_LEN]) -> Result<Self> {
        Ok(Self {
            core: GcmCore::new(key, iv)?,
        })
    }
}

impl GcmEncryptContext for GcmEncryptor {
    fn update(&mut self, plain: &[u8]) -> Result<Vec<u8>> {
        let total = self.core.reserve(plain.len())?;
        let mut out = plain.to_vec();
        self.core.keystream(&mut out)?;
        self.core.absorb(&out);
        self.core.processed = total;
        Ok(out)
    }

    fn finish(self) -> Result<[u8; TAG_LEN]> {
        Ok(self.core.tag())
    }
}

/// Decrypting half of the streaming engine
pub struct GcmDecryptor {
    core: GcmCore,
    expected_tag: [u8; TAG_LEN],
}

impl GcmDecryptor {
    pub fn new(key: &[u8], iv: &[u8; IV_LEN], expected_tag: &[u8; TAG_LEN]) -> Result<Self> {
        Ok(Self {
            core: GcmCore::new(key, iv)?,
            expected_tag: *expected_tag,
        })
    }
}

impl GcmDecryptContext for GcmDecryptor {
    fn update(&mut self, cipher: &[u8]) -> Result<Vec<u8>> {
        let total = self.core.reserve(cipher.len())?;
        let mut out = cipher.to_vec();
        self.core.keystream(&mut out)?;
        self.core.absorb(cipher);
        self.core.processed = total;
        Ok(out)
    }

    fn finish(self) -> Result<()> {
        let expected = self.expected_tag;
        let computed = self.core.tag();
        if bool::from(computed[..].ct_eq(&expected[..])) {
            Ok(())
        } else {
            Err(CryptoError::AuthenticationFailed)
        }
    }
}
