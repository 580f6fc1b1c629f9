// src/key_pair.rs
//! User key-pair generation and password check

use tracing::{debug, warn};

use crate::error::{CryptoError, Result};
use crate::model::{UserKeyPair, UserPrivateKey, UserPublicKey};
use crate::provider::CryptoProvider;
use crate::versions::KeyPairVersion;

/// Generate an RSA key pair of `version` strength, private half protected by `password`
///
/// The fresh private key is decrypted once with `password` before it is
/// returned; a key the provider cannot reopen is reported as
/// [`CryptoError::KeyPairIntegrityFailure`].
pub fn generate_user_key_pair<P: CryptoProvider>(
    provider: &P,
    version: KeyPairVersion,
    password: &str,
) -> Result<UserKeyPair> {
    if password.is_empty() {
        return Err(CryptoError::PasswordEmpty);
    }

    let (public_pem, private_pem) =
        provider.generate_rsa_key_pair(password, version.modulus_bits())?;

    if !provider.can_decrypt_private_key(&private_pem, password) {
        warn!(%version, "generated private key failed self-check");
        return Err(CryptoError::KeyPairIntegrityFailure);
    }

    let public_key = UserPublicKey::new(public_pem, version);
    debug!(%version, fingerprint = %public_key.fingerprint(), "user key pair generated");

    Ok(UserKeyPair::new(
        public_key,
        UserPrivateKey::new(private_pem, version),
    ))
}

/// True when both halves carry the same version and `password` unlocks the private key
///
/// Never errors: malformed key material is just `false`.
pub fn check_user_key_pair<P: CryptoProvider>(
    provider: &P,
    key_pair: &UserKeyPair,
    password: &str,
) -> bool {
    let public = &key_pair.public_key_container;
    let private = &key_pair.private_key_container;

    if public.version != private.version {
        debug!(
            public = %public.version,
            private = %private.version,
            "key pair halves have different versions"
        );
        return false;
    }

    provider.can_decrypt_private_key(&private.private_key, password)
}
