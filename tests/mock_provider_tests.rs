// tests/mock_provider_tests.rs
//! The whole protocol against the deterministic provider
//!
//! Fast enough to run every scenario without RSA key generation.

mod common;

use envelope_file_crypto::provider::mock::plain_file_key;
use envelope_file_crypto::{
    decrypt_all, encrypt_all, Crypto, CryptoError, ErrorKind, KeyPairVersion,
    MockCryptoProvider, PlainFileKeyVersion,
};

fn mock() -> Crypto<MockCryptoProvider> {
    Crypto::with_provider(MockCryptoProvider::new())
}

#[test]
fn test_full_envelope_flow() {
    common::setup();
    let crypto = mock();

    for version in KeyPairVersion::ALL {
        let pair = crypto.generate_user_key_pair(version, "pw").unwrap();
        assert!(crypto.check_user_key_pair(&pair, "pw"));
        assert!(!crypto.check_user_key_pair(&pair, "pW"));

        let file_key = crypto.generate_file_key(PlainFileKeyVersion::Aes256Gcm).unwrap();
        let mut enc = crypto.create_encryption_cipher(file_key).unwrap();
        let mut ct = enc.process_block(b"hello ").unwrap();
        ct.extend(enc.process_block(b"world").unwrap());
        let file_key = enc.finalize().unwrap();

        let wrapped = crypto
            .encrypt_file_key(&file_key, &pair.public_key_container)
            .unwrap();
        let unwrapped = crypto
            .decrypt_file_key(&wrapped, &pair.private_key_container, "pw")
            .unwrap();
        assert_eq!(unwrapped, file_key);

        let mut dec = crypto.create_decryption_cipher(&unwrapped).unwrap();
        let plain = dec.process_block(&ct).unwrap();
        dec.finalize().unwrap();
        assert_eq!(*plain, b"hello world");
    }
}

#[test]
fn test_same_call_sequence_gives_same_bytes() {
    let run = || {
        let crypto = mock();
        let key = crypto.generate_file_key(PlainFileKeyVersion::Aes256Gcm).unwrap();
        encrypt_all(crypto.provider(), key, b"deterministic", 4).unwrap()
    };
    let (ct_a, key_a) = run();
    let (ct_b, key_b) = run();
    assert_eq!(ct_a, ct_b);
    assert_eq!(key_a, key_b);
}

#[test]
fn test_fixture_key_encrypts_and_detects_tampering() {
    let p = MockCryptoProvider::new();
    let key = plain_file_key();
    assert_eq!(key.version(), PlainFileKeyVersion::Aes256Gcm);

    let (mut ct, key) = encrypt_all(&p, key, b"payload", 3).unwrap();
    assert_eq!(decrypt_all(&p, &key, &ct, 5).unwrap(), b"payload");

    ct[0] ^= 1;
    assert!(matches!(
        decrypt_all(&p, &key, &ct, 5),
        Err(CryptoError::AuthenticationFailed)
    ));
}

#[test]
fn test_wrong_password_unwrap_is_cryptographic() {
    let crypto = mock();
    let pair = crypto
        .generate_user_key_pair(KeyPairVersion::Rsa2048, "pw")
        .unwrap();
    let (_, file_key) = encrypt_all(crypto.provider(), plain_file_key(), b"x", 1).unwrap();
    let wrapped = crypto
        .encrypt_file_key(&file_key, &pair.public_key_container)
        .unwrap();

    let err = crypto
        .decrypt_file_key(&wrapped, &pair.private_key_container, "nope")
        .unwrap_err();
    assert!(matches!(err, CryptoError::FileKeyDecryptionFailed));
    assert_eq!(err.kind(), ErrorKind::Cryptographic);
}

#[test]
fn test_error_kinds_separate_provider_failures() {
    assert_eq!(CryptoError::KeyPairIntegrityFailure.kind(), ErrorKind::Provider);
    assert!(!CryptoError::KeyPairIntegrityFailure.is_user_correctable());
    assert_eq!(
        CryptoError::CipherInitFailed("x".into()).kind(),
        ErrorKind::Provider
    );
    assert!(!CryptoError::AuthenticationFailed.is_user_correctable());
    assert!(CryptoError::MissingIv.is_user_correctable());
}
