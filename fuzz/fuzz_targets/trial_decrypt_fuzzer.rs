//! Fuzz target for trial decryption over arbitrary pools and blobs
//!
//! # Strategy
//!
//! - Every supported transformation
//! - Key and IV pools of every kind with arbitrary (often invalid) key lengths
//! - Time pools with boundary timestamps and small windows
//! - Arbitrary ciphertext and checksum bytes
//! - Encrypt/decrypt exchanges through the same pool configuration
//!
//! # Invariants
//!
//! - Decrypt never panics
//! - Errors are configuration errors only (empty key pool, IV/mode mismatch)
//! - A returned result has at least one trial; success iff the last matched
//! - An exhausted search records `|keys| * max(1, |ivs|)` trials
//! - A blob produced by the encryptor decrypts back to its plaintext

#![no_main]

use std::{sync::Arc, time::Duration};

use arbitrary::Arbitrary;
use driftkey_core::{
    CipherBlob, DecryptError, EmptyPool, FixedParameter, FixedPool, KeyPool, RotationPool,
    TimeBasedPool, TrialDecryptorBuilder,
};
use driftkey_crypto::sha256_checksum;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct TrialScenario {
    /// Transformation preset
    preset: Preset,
    /// Shape of the key pool
    keys: PoolShape,
    /// Shape of the IV pool
    ivs: PoolShape,
    /// Synchronization parameter
    parameter: i64,
    /// Received blob
    ciphertext: Vec<u8>,
    checksum: Vec<u8>,
    /// Plaintext for the encrypt/decrypt exchange
    plaintext: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Preset {
    Sm4Ecb,
    Sm4Cbc,
    Sm4Cfb,
    Sm4Ofb,
    AesEcb,
    AesCbc,
}

impl Preset {
    fn builder(self) -> TrialDecryptorBuilder {
        match self {
            Preset::Sm4Ecb => TrialDecryptorBuilder::sm4_ecb(),
            Preset::Sm4Cbc => TrialDecryptorBuilder::sm4_cbc(),
            Preset::Sm4Cfb => TrialDecryptorBuilder::sm4_cfb(),
            Preset::Sm4Ofb => TrialDecryptorBuilder::sm4_ofb(),
            Preset::AesEcb => TrialDecryptorBuilder::aes_ecb(),
            Preset::AesCbc => TrialDecryptorBuilder::aes_cbc(),
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
enum PoolShape {
    Empty,
    Fixed(Vec<u8>),
    Rotation(Vec<Vec<u8>>),
    /// Window clamped to 1..=8
    Time { key_size: u8, window: u8, interval_millis: u32, fill: Vec<u8> },
}

impl PoolShape {
    fn build(&self) -> Arc<dyn KeyPool> {
        match self {
            PoolShape::Empty => Arc::new(EmptyPool::new()),
            PoolShape::Fixed(key) => Arc::new(FixedPool::new(key.clone())),
            PoolShape::Rotation(keys) => match RotationPool::from_keys(keys.iter().take(16).cloned()) {
                Ok(pool) => Arc::new(pool),
                Err(_) => Arc::new(EmptyPool::new()),
            },
            PoolShape::Time { key_size, window, interval_millis, fill } => {
                let built = TimeBasedPool::builder(usize::from(*key_size))
                    .window_size(u32::from(window % 8) + 1)
                    .interval(Duration::from_millis(u64::from(*interval_millis)))
                    .fill_bytes(fill.clone())
                    .build();
                match built {
                    Ok(pool) => Arc::new(pool),
                    Err(_) => Arc::new(EmptyPool::new()),
                }
            },
        }
    }
}

fuzz_target!(|scenario: TrialScenario| {
    let key_pool = scenario.keys.build();
    let iv_pool = scenario.ivs.build();
    let key_count = key_pool.decrypt_keys(scenario.parameter).len();
    let iv_count = iv_pool.decrypt_keys(scenario.parameter).len();

    let builder = || {
        scenario
            .preset
            .builder()
            .key_pool(Arc::clone(&key_pool))
            .iv_pool(Arc::clone(&iv_pool))
            .checksum_function(sha256_checksum())
            .parameter_supplier(FixedParameter(scenario.parameter))
    };
    let decryptor = builder().build().expect("presets always build");
    let encryptor = builder().build_encryptor().expect("presets always build");

    // INVARIANT 1: Decrypt never panics and only fails on configuration
    let blob = CipherBlob::new(scenario.ciphertext.clone(), scenario.checksum.clone());
    match decryptor.decrypt(&blob) {
        Ok(result) => {
            // INVARIANT 2: At least one trial, success iff the last matched
            assert!(!result.tried().is_empty(), "result must record trials");
            let last_matched = result.tried().last().is_some_and(|info| info.matched());
            assert_eq!(result.success(), last_matched, "success must reflect last trial");
            assert!(
                result.tried().iter().rev().skip(1).all(|info| !info.matched()),
                "search must stop at the first match"
            );

            // INVARIANT 3: Exhausted search is complete
            if !result.success() {
                assert_eq!(result.tried().len(), key_count * iv_count.max(1));
            }
        },
        Err(DecryptError::NoKeyAvailable { .. }) => {
            assert_eq!(key_count, 0, "keys were available");
        },
        Err(DecryptError::Cipher(e)) => {
            assert!(e.is_configuration(), "per-trial errors must not abort: {e}");
        },
        Err(DecryptError::NotMatched { .. }) => {
            panic!("decrypt never reports NotMatched");
        },
    }

    // INVARIANT 4: Encrypted blobs decrypt back to their plaintext
    if let Ok(blob) = encryptor.encrypt(&scenario.plaintext) {
        let result = decryptor.decrypt(&blob).expect("encryption succeeded, keys exist");
        let matched = result.required_matched().expect("encrypting key is a candidate");
        assert_eq!(matched.data(), Some(&scenario.plaintext[..]));
    }
});
