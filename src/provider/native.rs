// src/provider/native.rs
//! Production provider: `rsa` + encrypted PKCS#8 + streaming AES-256-GCM

use pkcs8::der::pem::PemLabel;
use pkcs8::pkcs5::pbes2;
use pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey,
    EncryptedPrivateKeyInfo, LineEnding, PrivateKeyInfo,
};
use rand::rngs::OsRng;
use rand::TryRngCore;
use rsa::{BigUint, Oaep, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use crate::aliases::SecretBytes;
use crate::config;
use crate::consts::{
    IV_LEN, PBKDF2_SALT_LEN, PKCS8_AES_IV_LEN, RSA_PUBLIC_EXPONENT, TAG_LEN,
};
use crate::error::{CryptoError, Result};
use crate::provider::gcm::{GcmDecryptor, GcmEncryptor};
use crate::provider::CryptoProvider;
use crate::versions::KeyPairVersion;

/// RSA-OAEP padding per key-pair version: SHA-256 digest, version-specific MGF1
fn oaep(version: KeyPairVersion) -> Oaep {
    match version {
        KeyPairVersion::Rsa2048 => Oaep::new_with_mgf_hash::<Sha256, Sha1>(),
        KeyPairVersion::Rsa4096 => Oaep::new::<Sha256>(),
    }
}

#[derive(Debug, Clone)]
pub struct RsaCryptoProvider {
    pbkdf2_iterations: u32,
}

impl RsaCryptoProvider {
    /// Provider using the configured PBKDF2 iteration count
    pub fn new() -> Self {
        Self::with_pbkdf2_iterations(config::load().crypto.pbkdf2_iterations)
    }

    pub fn with_pbkdf2_iterations(pbkdf2_iterations: u32) -> Self {
        Self { pbkdf2_iterations }
    }

    pub fn pbkdf2_iterations(&self) -> u32 {
        self.pbkdf2_iterations
    }

    fn fill_random(&self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|_| CryptoError::RandomGenerationFailed)
    }

    fn encrypt_private_key(&self, key: &RsaPrivateKey, password: &str) -> Result<Zeroizing<String>> {
        let failed = |e: String| CryptoError::KeyPairGenerationFailed(e);

        let mut salt = [0u8; PBKDF2_SALT_LEN];
        let mut iv = [0u8; PKCS8_AES_IV_LEN];
        self.fill_random(&mut salt)?;
        self.fill_random(&mut iv)?;

        let params = pbes2::Parameters::pbkdf2_sha256_aes256cbc(self.pbkdf2_iterations, &salt, &iv)
            .map_err(|e| failed(e.to_string()))?;

        let der = key.to_pkcs8_der().map_err(|e| failed(e.to_string()))?;
        let info = PrivateKeyInfo::try_from(der.as_bytes()).map_err(|e| failed(e.to_string()))?;
        let encrypted = info
            .encrypt_with_params(params, password)
            .map_err(|e| failed(e.to_string()))?;

        encrypted
            .to_pem(EncryptedPrivateKeyInfo::PEM_LABEL, LineEnding::LF)
            .map_err(|e| failed(e.to_string()))
    }
}

impl Default for RsaCryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoProvider for RsaCryptoProvider {
    type EncryptContext = GcmEncryptor;
    type DecryptContext = GcmDecryptor;

    fn generate_rsa_key_pair(&self, password: &str, modulus_bits: usize) -> Result<(String, String)> {
        debug!(modulus_bits, iterations = self.pbkdf2_iterations, "generating RSA key pair");

        let exponent = BigUint::from(RSA_PUBLIC_EXPONENT);
        let private_key = RsaPrivateKey::new_with_exp(&mut rsa::rand_core::OsRng, modulus_bits, &exponent)
            .map_err(|e| CryptoError::KeyPairGenerationFailed(e.to_string()))?;

        let public_pem = RsaPublicKey::from(&private_key)
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyPairGenerationFailed(e.to_string()))?;
        let private_pem = self.encrypt_private_key(&private_key, password)?;

        Ok((public_pem, private_pem.to_string()))
    }

    fn can_decrypt_private_key(&self, encrypted_private_key_pem: &str, password: &str) -> bool {
        RsaPrivateKey::from_pkcs8_encrypted_pem(encrypted_private_key_pem, password).is_ok()
    }

    fn rsa_oaep_encrypt(
        &self,
        plain: &[u8],
        public_key_pem: &str,
        version: KeyPairVersion,
    ) -> Result<Vec<u8>> {
        let public_key = RsaPublicKey::from_public_key_pem(public_key_pem).map_err(|e| {
            debug!("public key rejected: {e}");
            CryptoError::FileKeyEncryptionFailed
        })?;

        public_key
            .encrypt(&mut rsa::rand_core::OsRng, oaep(version), plain)
            .map_err(|_| CryptoError::FileKeyEncryptionFailed)
    }

    fn rsa_oaep_decrypt(
        &self,
        cipher: &[u8],
        encrypted_private_key_pem: &str,
        password: &str,
        version: KeyPairVersion,
    ) -> Result<SecretBytes> {
        // Wrong password, wrong key and corrupt ciphertext are one error
        let private_key = RsaPrivateKey::from_pkcs8_encrypted_pem(encrypted_private_key_pem, password)
            .map_err(|_| CryptoError::FileKeyDecryptionFailed)?;

        private_key
            .decrypt_blinded(&mut rsa::rand_core::OsRng, oaep(version), cipher)
            .map(SecretBytes::new)
            .map_err(|_| CryptoError::FileKeyDecryptionFailed)
    }

    fn random_bytes(&self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.fill_random(&mut buf)?;
        Ok(buf)
    }

    fn open_gcm_encrypt_context(&self, key: &[u8], iv: &[u8; IV_LEN]) -> Result<GcmEncryptor> {
        GcmEncryptor::new(key, iv)
    }

    fn open_gcm_decrypt_context(
        &self,
        key: &[u8],
        iv: &[u8; IV_LEN],
        expected_tag: &[u8; TAG_LEN],
    ) -> Result<GcmDecryptor> {
        GcmDecryptor::new(key, iv, expected_tag)
    }
}
