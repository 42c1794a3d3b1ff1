//! Property-based tests for pools and trial decryption.
//!
//! These tests verify critical invariants:
//! - Rotation decrypt candidates ignore the rotation counter
//! - A time window yields 2W+1 candidates, current bucket first
//! - Drift within `W * interval` decrypts, drift beyond it does not
//! - The search stops at the first match
//! - An exhausted search records every (key, IV) pair
//! - An empty key pool is a configuration error, not a failed search

use std::{sync::Arc, time::Duration};

use driftkey_core::{
    CipherBlob, DecryptError, DynamicEncryptor, EmptyPool, FixedParameter, FixedPool, KeyPool,
    RotationPool, TimeBasedPool, TrialDecryptor, TrialDecryptorBuilder,
};
use driftkey_crypto::{ChecksumFn, sha256_checksum};
use proptest::prelude::*;

const IV: [u8; 16] = [0x42; 16];

fn time_pool(window_size: u32, interval_millis: u64) -> TimeBasedPool {
    TimeBasedPool::builder(16)
        .window_size(window_size)
        .interval(Duration::from_millis(interval_millis))
        .fill_bytes(*b"\x01\x02\x03\x04")
        .build()
        .expect("valid time pool configuration")
}

fn time_exchange(window_size: u32, interval_millis: u64) -> (DynamicEncryptor, TrialDecryptor) {
    let builder = || {
        TrialDecryptorBuilder::sm4_cbc()
            .key_pool(time_pool(window_size, interval_millis))
            .iv_pool(FixedPool::new(IV))
            .checksum_function(sha256_checksum())
    };
    let encryptor = builder().build_encryptor().expect("encryptor should build");
    let decryptor = builder().build().expect("decryptor should build");
    (encryptor, decryptor)
}

fn constant_checksum() -> ChecksumFn {
    Arc::new(|_: &[u8]| vec![0xAA])
}

fn key_set(max: usize) -> impl Strategy<Value = Vec<[u8; 16]>> {
    prop::collection::vec(any::<[u8; 16]>(), 1..=max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// INVARIANT: `decrypt_keys` returns every key in insertion order no matter
    /// how often `encrypt_key` advanced the counter.
    #[test]
    fn prop_rotation_decrypt_ignores_counter(
        keys in key_set(8),
        advances in 0usize..50,
        param in any::<i64>(),
    ) {
        let pool = RotationPool::from_keys(keys.clone()).expect("non-empty key set");
        for _ in 0..advances {
            pool.encrypt_key(param);
        }

        let candidates = pool.decrypt_keys(param);
        prop_assert_eq!(candidates.len(), keys.len());
        for (index, (candidate, key)) in candidates.iter().zip(&keys).enumerate() {
            prop_assert_eq!(candidate.tag(), index.to_string());
            prop_assert_eq!(candidate.key(), &key[..]);
        }
    }

    /// INVARIANT: A window of W yields 2W+1 candidates and the first one is the
    /// encryption key.
    #[test]
    fn prop_time_window_symmetry(
        window_size in 1u32..16,
        interval_millis in 1u64..120_000,
        timestamp in any::<i64>(),
    ) {
        let pool = time_pool(window_size, interval_millis);
        let candidates = pool.decrypt_keys(timestamp);
        let encrypt_key = pool.encrypt_key(timestamp).expect("time pool always has a key");

        prop_assert_eq!(candidates.len(), 2 * window_size as usize + 1);
        prop_assert_eq!(&candidates[0], &encrypt_key);
    }

    /// INVARIANT: Receiver clock within `W * interval` of the sender's
    /// recovers the plaintext.
    #[test]
    fn prop_drift_within_window_decrypts(
        window_size in 1u32..4,
        interval_millis in 1_000u64..60_000,
        sent_at in -1_000_000_000_000i64..4_000_000_000_000,
        drift_fraction in -1.0f64..=1.0,
        plaintext in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        let (encryptor, decryptor) = time_exchange(window_size, interval_millis);
        let tolerance = i64::from(window_size) * interval_millis as i64;
        let drift = (tolerance as f64 * drift_fraction) as i64;

        let blob = encryptor.encrypt_at(&plaintext, sent_at).expect("encrypt should succeed");
        let result = decryptor.decrypt_at(&blob, sent_at + drift).expect("keys available");

        prop_assert!(result.success());
        let matched = result.required_matched().expect("match present");
        prop_assert_eq!(matched.data(), Some(&plaintext[..]));
    }

    /// INVARIANT: Receiver clock `(W + 1) * interval` away in either direction
    /// does not recover the plaintext.
    #[test]
    fn prop_drift_beyond_window_fails(
        window_size in 1u32..4,
        interval_millis in 1_000u64..60_000,
        sent_at in -1_000_000_000_000i64..4_000_000_000_000,
        ahead in any::<bool>(),
        plaintext in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        let (encryptor, decryptor) = time_exchange(window_size, interval_millis);
        let beyond = (i64::from(window_size) + 1) * interval_millis as i64;
        let received_at = if ahead { sent_at + beyond } else { sent_at - beyond };

        let blob = encryptor.encrypt_at(&plaintext, sent_at).expect("encrypt should succeed");
        let result = decryptor.decrypt_at(&blob, received_at).expect("keys available");

        prop_assert!(!result.success());
        prop_assert_eq!(result.tried().len(), 2 * window_size as usize + 1);
    }

    /// INVARIANT: When every candidate would match, only the first one is
    /// tried.
    #[test]
    fn prop_search_stops_at_first_match(
        keys in key_set(6),
        ivs in key_set(4),
        ciphertext in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let decryptor = TrialDecryptorBuilder::sm4_ofb()
            .key_pool(RotationPool::from_keys(keys).expect("non-empty key set"))
            .iv_pool(RotationPool::from_keys(ivs).expect("non-empty iv set"))
            .checksum_function(constant_checksum())
            .build()
            .expect("decryptor should build");

        let result = decryptor
            .decrypt_at(&CipherBlob::new(ciphertext, vec![0xAAu8]), 0)
            .expect("keys available");

        prop_assert!(result.success());
        prop_assert_eq!(result.tried().len(), 1);
        prop_assert_eq!(result.tried()[0].key_tag(), "0");
        prop_assert_eq!(result.tried()[0].iv_tag(), Some("0"));
    }

    /// INVARIANT: An exhausted search records `|keys| * max(1, |ivs|)` trials.
    #[test]
    fn prop_exhausted_search_is_complete(
        keys in key_set(6),
        ivs in prop::collection::vec(any::<[u8; 16]>(), 0..4),
        ciphertext in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let key_count = keys.len();
        let iv_count = ivs.len();
        let builder = if ivs.is_empty() {
            TrialDecryptorBuilder::sm4_ecb().iv_pool(EmptyPool::new())
        } else {
            TrialDecryptorBuilder::sm4_cbc()
                .iv_pool(RotationPool::from_keys(ivs).expect("non-empty iv set"))
        };
        let decryptor = builder
            .key_pool(RotationPool::from_keys(keys).expect("non-empty key set"))
            .checksum_function(sha256_checksum())
            .build()
            .expect("decryptor should build");

        // A 32-byte SHA-256 never equals an empty checksum
        let result = decryptor
            .decrypt_at(&CipherBlob::without_checksum(ciphertext), 0)
            .expect("keys available");

        prop_assert!(!result.success());
        prop_assert_eq!(result.tried().len(), key_count * iv_count.max(1));
        prop_assert!(result.tried().iter().all(|info| !info.matched()));
    }

    /// INVARIANT: An empty key pool raises `NoKeyAvailable` rather than
    /// returning a failed result.
    #[test]
    fn prop_empty_key_pool_is_fatal(
        param in any::<i64>(),
        ciphertext in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let decryptor = TrialDecryptorBuilder::sm4_ecb()
            .key_pool(EmptyPool::new())
            .checksum_function(sha256_checksum())
            .parameter_supplier(FixedParameter(param))
            .build()
            .expect("decryptor should build");

        let err = decryptor
            .decrypt(&CipherBlob::new(ciphertext, vec![0u8; 32]))
            .expect_err("empty pool must be fatal");

        prop_assert_eq!(err, DecryptError::NoKeyAvailable { parameter: param });
    }
}
