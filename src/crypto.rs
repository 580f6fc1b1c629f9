// src/crypto.rs
//! One-stop facade over every protocol operation
//!
//! ```no_run
//! use envelope_file_crypto::{Crypto, KeyPairVersion, PlainFileKeyVersion};
//!
//! # fn main() -> envelope_file_crypto::Result<()> {
//! let crypto = Crypto::new();
//! let pair = crypto.generate_user_key_pair(KeyPairVersion::Rsa4096, "secret")?;
//!
//! let file_key = crypto.generate_file_key(PlainFileKeyVersion::Aes256Gcm)?;
//! let mut enc = crypto.create_encryption_cipher(file_key)?;
//! let cipher_text = enc.process_block(b"hello")?;
//! let file_key = enc.finalize()?;
//!
//! let wrapped = crypto.encrypt_file_key(&file_key, &pair.public_key_container)?;
//! let unwrapped = crypto.decrypt_file_key(&wrapped, &pair.private_key_container, "secret")?;
//!
//! let mut dec = crypto.create_decryption_cipher(&unwrapped)?;
//! let plain = dec.process_block(&cipher_text)?;
//! dec.finalize()?;
//! assert_eq!(*plain, b"hello");
//! # Ok(())
//! # }
//! ```

use crate::cipher::{DecryptionCipher, EncryptionCipher};
use crate::error::Result;
use crate::file_key;
use crate::key_pair;
use crate::model::{EncryptedFileKey, PlainFileKey, UserKeyPair, UserPrivateKey, UserPublicKey};
use crate::provider::{CryptoProvider, RsaCryptoProvider};
use crate::versions::{KeyPairVersion, PlainFileKeyVersion};

/// All services bound to one provider
#[derive(Debug, Clone, Default)]
pub struct Crypto<P: CryptoProvider = RsaCryptoProvider> {
    provider: P,
}

impl Crypto<RsaCryptoProvider> {
    /// Production provider with the configured PBKDF2 iteration count
    pub fn new() -> Self {
        Self::with_provider(RsaCryptoProvider::new())
    }
}

impl<P: CryptoProvider> Crypto<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn generate_user_key_pair(
        &self,
        version: KeyPairVersion,
        password: &str,
    ) -> Result<UserKeyPair> {
        key_pair::generate_user_key_pair(&self.provider, version, password)
    }

    pub fn check_user_key_pair(&self, key_pair: &UserKeyPair, password: &str) -> bool {
        key_pair::check_user_key_pair(&self.provider, key_pair, password)
    }

    pub fn generate_file_key(&self, version: PlainFileKeyVersion) -> Result<PlainFileKey> {
        file_key::generate_file_key(&self.provider, version)
    }

    pub fn encrypt_file_key(
        &self,
        file_key: &PlainFileKey,
        public_key: &UserPublicKey,
    ) -> Result<EncryptedFileKey> {
        file_key::encrypt_file_key(&self.provider, file_key, public_key)
    }

    pub fn decrypt_file_key(
        &self,
        encrypted: &EncryptedFileKey,
        private_key: &UserPrivateKey,
        password: &str,
    ) -> Result<PlainFileKey> {
        file_key::decrypt_file_key(&self.provider, encrypted, private_key, password)
    }

    pub fn create_encryption_cipher(
        &self,
        file_key: PlainFileKey,
    ) -> Result<EncryptionCipher<P::EncryptContext>> {
        EncryptionCipher::begin(&self.provider, file_key)
    }

    pub fn create_decryption_cipher(
        &self,
        file_key: &PlainFileKey,
    ) -> Result<DecryptionCipher<P::DecryptContext>> {
        DecryptionCipher::begin(&self.provider, file_key)
    }
}
