// tests/support.rs
//! Fixtures shared by the integration tests
//!
//! RSA generation is the slow part of the suite, so each test binary makes
//! at most one key pair per version and reuses it.

#![allow(dead_code)]

use envelope_file_crypto::{Crypto, KeyPairVersion, RsaCryptoProvider, UserKeyPair};
use std::sync::OnceLock;

pub const PASSWORD: &str = "Pa$$w0rd-fixture";

/// Keeps encrypted-PKCS#8 handling fast; production uses the configured count
pub const FAST_PBKDF2_ITERATIONS: u32 = 1_000;

pub fn crypto() -> Crypto {
    Crypto::with_provider(RsaCryptoProvider::with_pbkdf2_iterations(
        FAST_PBKDF2_ITERATIONS,
    ))
}

pub fn key_pair(version: KeyPairVersion) -> &'static UserKeyPair {
    static RSA_2048: OnceLock<UserKeyPair> = OnceLock::new();
    static RSA_4096: OnceLock<UserKeyPair> = OnceLock::new();

    let cell = match version {
        KeyPairVersion::Rsa2048 => &RSA_2048,
        KeyPairVersion::Rsa4096 => &RSA_4096,
    };
    cell.get_or_init(|| {
        crypto()
            .generate_user_key_pair(version, PASSWORD)
            .expect("fixture key pair")
    })
}

/// Deterministic, non-repeating-looking test content
pub fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(7919) >> 3) as u8).collect()
}
