//! Property-based tests for the block cipher primitive
//!
//! These tests verify the invariants the trial decryptor relies on:
//!
//! 1. **Round-trip**: decrypt(encrypt(m)) == m for every supported mode
//! 2. **Determinism**: same key, IV and input always produce the same output
//! 3. **Key sensitivity**: a different key never reproduces the plaintext
//! 4. **Error classes**: configuration errors do not depend on the key

use driftkey_crypto::{CipherPrimitive, SoftwareCipher, Transformation, truncated_sha256};
use proptest::prelude::*;

const TRANSFORMATIONS: &[(&str, bool)] = &[
    ("SM4/ECB/PKCS7Padding", false),
    ("SM4/CBC/PKCS7Padding", true),
    ("SM4/CFB/NoPadding", true),
    ("SM4/OFB/NoPadding", true),
    ("AES/ECB/PKCS7Padding", false),
    ("AES/CBC/PKCS7Padding", true),
    ("AES/CFB/NoPadding", true),
    ("AES/OFB/NoPadding", true),
];

fn transformation_strategy() -> impl Strategy<Value = (Transformation, bool)> {
    prop::sample::select(TRANSFORMATIONS)
        .prop_map(|(text, needs_iv)| (text.parse::<Transformation>().unwrap(), needs_iv))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_encrypt_decrypt_roundtrip(
        (transformation, needs_iv) in transformation_strategy(),
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
    ) {
        let cipher = SoftwareCipher::new();
        let iv = needs_iv.then_some(&iv[..]);

        let encrypted = cipher.encrypt(&transformation, &key, iv, &plaintext).unwrap();
        let decrypted = cipher.decrypt(&transformation, &key, iv, &encrypted).unwrap();

        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn prop_encryption_is_deterministic(
        (transformation, needs_iv) in transformation_strategy(),
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
    ) {
        let cipher = SoftwareCipher::new();
        let iv = needs_iv.then_some(&iv[..]);

        let first = cipher.encrypt(&transformation, &key, iv, &plaintext).unwrap();
        let second = cipher.encrypt(&transformation, &key, iv, &plaintext).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_wrong_key_fails_checksum(
        (transformation, needs_iv) in transformation_strategy(),
        plaintext in prop::collection::vec(any::<u8>(), 1..128),
        key in any::<[u8; 16]>(),
        flip in 0usize..16,
        iv in any::<[u8; 16]>(),
    ) {
        let cipher = SoftwareCipher::new();
        let checksum = truncated_sha256(8);
        let iv = needs_iv.then_some(&iv[..]);

        let mut wrong_key = key;
        wrong_key[flip] ^= 0x01;

        let encrypted = cipher.encrypt(&transformation, &key, iv, &plaintext).unwrap();

        // Either the primitive rejects the output, or the checksum does
        if let Ok(garbage) = cipher.decrypt(&transformation, &wrong_key, iv, &encrypted) {
            prop_assert_ne!(checksum(&garbage), checksum(&plaintext));
        }
    }

    #[test]
    fn prop_missing_iv_is_configuration_error(
        key in any::<[u8; 16]>(),
        ciphertext in prop::collection::vec(any::<u8>(), 16..=16),
    ) {
        let cipher = SoftwareCipher::new();
        let transformation: Transformation = "SM4/CBC/PKCS7Padding".parse().unwrap();

        let err = cipher.decrypt(&transformation, &key, None, &ciphertext).unwrap_err();
        prop_assert!(err.is_configuration());
    }
}
