// tests/cipher_tests.rs
mod common;
mod support;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use envelope_file_crypto::aliases::SecretBytes;
use envelope_file_crypto::{
    decrypt_all, encrypt_all, CryptoError, ErrorKind, PlainFileKey, PlainFileKeyVersion,
    RsaCryptoProvider,
};
use proptest::prelude::*;
use support::{crypto, sample};

fn provider() -> RsaCryptoProvider {
    RsaCryptoProvider::with_pbkdf2_iterations(support::FAST_PBKDF2_ITERATIONS)
}

fn fresh_key() -> PlainFileKey {
    crypto()
        .generate_file_key(PlainFileKeyVersion::Aes256Gcm)
        .unwrap()
}

fn flip_b64(value: &str, index: usize) -> String {
    let mut bytes = STANDARD.decode(value).unwrap();
    bytes[index] ^= 0x80;
    STANDARD.encode(bytes)
}

fn with_iv(key: &PlainFileKey, iv: String) -> PlainFileKey {
    PlainFileKey::from_parts(key.key(), key.version(), Some(iv), key.tag().map(str::to_string))
}

fn with_tag(key: &PlainFileKey, tag: String) -> PlainFileKey {
    PlainFileKey::from_parts(key.key(), key.version(), key.iv().map(str::to_string), Some(tag))
}

#[test]
fn test_session_sets_iv_then_tag() {
    common::setup();
    let crypto = crypto();

    let mut enc = crypto.create_encryption_cipher(fresh_key()).unwrap();
    let iv = enc.file_key().iv().unwrap().to_string();
    assert_eq!(STANDARD.decode(&iv).unwrap().len(), 12);
    assert!(enc.file_key().tag().is_none());

    let ct = enc.process_block(b"attack at dawn").unwrap();
    assert_eq!(ct.len(), 14);

    let key = enc.finalize().unwrap();
    assert_eq!(key.iv(), Some(iv.as_str()));
    assert_eq!(STANDARD.decode(key.tag().unwrap()).unwrap().len(), 16);
}

#[test]
fn test_each_session_draws_a_new_iv() {
    let crypto = crypto();
    let key = fresh_key();
    let a = crypto.create_encryption_cipher(key.clone()).unwrap();
    let b = crypto.create_encryption_cipher(key).unwrap();
    assert_ne!(a.file_key().iv(), b.file_key().iv());
}

#[test]
fn test_roundtrip_with_different_chunking() {
    let crypto = crypto();
    let plain = sample(10_000);

    let mut enc = crypto.create_encryption_cipher(fresh_key()).unwrap();
    let mut ct = Vec::new();
    for chunk in plain.chunks(1000) {
        ct.extend(enc.process_block(chunk).unwrap());
    }
    let key = enc.finalize().unwrap();

    let mut dec = crypto.create_decryption_cipher(&key).unwrap();
    let mut out = Vec::new();
    for chunk in ct.chunks(333) {
        out.extend_from_slice(&dec.process_block(chunk).unwrap());
    }
    dec.finalize().unwrap();

    assert_eq!(out, plain);
}

#[test]
fn test_decrypted_chunks_come_back_as_secret_buffers() {
    let crypto = crypto();
    let (ct, key) = encrypt_all(&provider(), fresh_key(), b"top secret", 4).unwrap();

    let mut dec = crypto.create_decryption_cipher(&key).unwrap();
    let head: SecretBytes = dec.process_block(&ct[..3]).unwrap();
    let tail: SecretBytes = dec.process_block(&ct[3..]).unwrap();
    dec.finalize().unwrap();

    assert_eq!([&head[..], &tail[..]].concat(), b"top secret");
}

#[test]
fn test_empty_content_still_authenticates() {
    let p = provider();
    let (ct, key) = encrypt_all(&p, fresh_key(), &[], 16).unwrap();
    assert!(ct.is_empty());
    assert!(decrypt_all(&p, &key, &[], 16).unwrap().is_empty());

    let wrong_tag = with_tag(&key, flip_b64(key.tag().unwrap(), 0));
    assert!(matches!(
        decrypt_all(&p, &wrong_tag, &[], 16),
        Err(CryptoError::AuthenticationFailed)
    ));
}

#[test]
fn test_tampering_fails_authentication() {
    let p = provider();
    let plain = sample(257);
    let (ct, key) = encrypt_all(&p, fresh_key(), &plain, 64).unwrap();

    let mut bad_ct = ct.clone();
    bad_ct[200] ^= 0x01;
    let bad_iv = with_iv(&key, flip_b64(key.iv().unwrap(), 11));
    let bad_tag = with_tag(&key, flip_b64(key.tag().unwrap(), 15));
    let mut truncated = ct.clone();
    truncated.pop();

    for (file_key, data) in [
        (&key, &bad_ct),
        (&bad_iv, &ct),
        (&bad_tag, &ct),
        (&key, &truncated),
    ] {
        let err = decrypt_all(&p, file_key, data, 64).unwrap_err();
        assert!(matches!(err, CryptoError::AuthenticationFailed));
        assert_eq!(err.kind(), ErrorKind::Cryptographic);
    }
}

#[test]
fn test_decryption_requires_iv_then_tag() {
    let crypto = crypto();
    let key_only = fresh_key();
    assert!(matches!(
        crypto.create_decryption_cipher(&key_only).err(),
        Some(CryptoError::MissingIv)
    ));

    let no_tag = PlainFileKey::from_parts(
        key_only.key(),
        PlainFileKeyVersion::Aes256Gcm,
        Some("AAAAAAAAAAAAAAAA".into()),
        None,
    );
    let err = crypto.create_decryption_cipher(&no_tag).err().unwrap();
    assert!(matches!(err, CryptoError::MissingTag));
    assert!(err.is_user_correctable());

    let no_iv = PlainFileKey::from_parts(
        key_only.key(),
        PlainFileKeyVersion::Aes256Gcm,
        None,
        Some("AAAAAAAAAAAAAAAAAAAAAA==".into()),
    );
    assert!(matches!(
        crypto.create_decryption_cipher(&no_iv).err(),
        Some(CryptoError::MissingIv)
    ));
}

#[test]
fn test_malformed_key_material_is_a_validation_error() {
    let crypto = crypto();

    let short_key = PlainFileKey::new(STANDARD.encode([1u8; 16]), PlainFileKeyVersion::Aes256Gcm);
    assert!(matches!(
        crypto.create_encryption_cipher(short_key).err(),
        Some(CryptoError::InvalidKeyLength { field: "key", expected: 32, actual: 16 })
    ));

    let (_, key) = encrypt_all(&provider(), fresh_key(), b"x", 1).unwrap();
    let long_iv = with_iv(&key, STANDARD.encode([0u8; 16]));
    assert!(matches!(
        crypto.create_decryption_cipher(&long_iv).err(),
        Some(CryptoError::InvalidKeyLength { field: "iv", .. })
    ));

    let not_b64 = with_tag(&key, "%%%".into());
    let err = crypto.create_decryption_cipher(&not_b64).err().unwrap();
    assert!(matches!(err, CryptoError::InvalidEncoding { field: "tag" }));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_file_key_debug_hides_key() {
    let key = fresh_key();
    let debug = format!("{key:?}");
    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains(key.key()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_any_chunking_roundtrips(
        plain in proptest::collection::vec(any::<u8>(), 0..2048),
        enc_chunk in 1usize..300,
        dec_chunk in 1usize..300,
    ) {
        let p = provider();
        let (ct, key) = encrypt_all(&p, fresh_key(), &plain, enc_chunk).unwrap();
        prop_assert_eq!(ct.len(), plain.len());
        prop_assert_eq!(decrypt_all(&p, &key, &ct, dec_chunk).unwrap(), plain);
    }

    #[test]
    fn prop_chunking_does_not_change_output(
        plain in proptest::collection::vec(any::<u8>(), 1..1024),
        split in 1usize..100,
    ) {
        let p = provider();
        let (ct, key) = encrypt_all(&p, fresh_key(), &plain, split).unwrap();

        // Same key and IV, one block: identical ciphertext and tag
        let mut dec = envelope_file_crypto::DecryptionCipher::begin(&p, &key).unwrap();
        let whole = dec.process_block(&ct).unwrap();
        dec.finalize().unwrap();
        prop_assert_eq!(&whole[..], &plain[..]);
    }

    #[test]
    fn prop_any_flipped_bit_is_detected(
        plain in proptest::collection::vec(any::<u8>(), 1..512),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let p = provider();
        let (mut ct, key) = encrypt_all(&p, fresh_key(), &plain, 100).unwrap();
        let i = position.index(ct.len());
        ct[i] ^= 1 << bit;
        prop_assert!(matches!(
            decrypt_all(&p, &key, &ct, 100),
            Err(CryptoError::AuthenticationFailed)
        ));
    }
}
