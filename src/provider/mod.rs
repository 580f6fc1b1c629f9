// src/provider/mod.rs
//! Primitive provider boundary
//!
//! The services never touch RSA or AES directly. Everything goes through a
//! [`CryptoProvider`]: the production [`RsaCryptoProvider`] in `native`, or
//! the deterministic [`MockCryptoProvider`] used by tests and examples.

mod gcm;
pub mod mock;
mod native;

pub use gcm::{GcmDecryptor, GcmEncryptor};
pub use mock::MockCryptoProvider;
pub use native::RsaCryptoProvider;

use crate::aliases::SecretBytes;
use crate::consts::{IV_LEN, TAG_LEN};
use crate::error::Result;
use crate::versions::KeyPairVersion;

/// Open AES-256-GCM encryption context
pub trait GcmEncryptContext {
    /// Encrypt the next chunk; output length equals input length
    fn update(&mut self, plain: &[u8]) -> Result<Vec<u8>>;

    /// Close the context and return the authentication tag
    fn finish(self) -> Result<[u8; TAG_LEN]>;
}

/// Open AES-256-GCM decryption context bound to an expected tag
pub trait GcmDecryptContext {
    /// Decrypt the next chunk. The output is unauthenticated until `finish`.
    fn update(&mut self, cipher: &[u8]) -> Result<Vec<u8>>;

    /// Recompute the tag over everything processed and compare
    fn finish(self) -> Result<()>;
}

/// RSA, random and AES-GCM capabilities consumed by the services
///
/// Private keys cross this boundary only as password-encrypted PKCS#8 PEM;
/// implementations unlock them inside a single call and drop them before
/// returning.
pub trait CryptoProvider {
    type EncryptContext: GcmEncryptContext;
    type DecryptContext: GcmDecryptContext;

    /// Returns `(public_key_pem, encrypted_private_key_pem)`
    fn generate_rsa_key_pair(&self, password: &str, modulus_bits: usize)
        -> Result<(String, String)>;

    /// Never fails: malformed PEM or a wrong password both yield `false`
    fn can_decrypt_private_key(&self, encrypted_private_key_pem: &str, password: &str) -> bool;

    fn rsa_oaep_encrypt(
        &self,
        plain: &[u8],
        public_key_pem: &str,
        version: KeyPairVersion,
    ) -> Result<Vec<u8>>;

    fn rsa_oaep_decrypt(
        &self,
        cipher: &[u8],
        encrypted_private_key_pem: &str,
        password: &str,
        version: KeyPairVersion,
    ) -> Result<SecretBytes>;

    fn random_bytes(&self, len: usize) -> Result<Vec<u8>>;

    fn open_gcm_encrypt_context(
        &self,
        key: &[u8],
        iv: &[u8; IV_LEN],
    ) -> Result<Self::EncryptContext>;

    fn open_gcm_decrypt_context(
        &self,
        key: &[u8],
        iv: &[u8; IV_LEN],
        expected_tag: &[u8; TAG_LEN],
    ) -> Result<Self::DecryptContext>;
}
