//! Keys derived from synchronized wall-clock time
//!
//! Both parties derive the same key from the same time bucket, so no key is
//! ever transported. The decrypting side tries a window of neighbouring
//! buckets to tolerate clock drift of up to `window_size * interval`.
//!
//! # Derivation
//!
//! ```text
//! timestamp, offset
//!        │
//!        ▼ floor((timestamp + offset * interval) / interval)
//! bucket (i64)
//!        │
//!        ▼ big-endian bytes, truncated or extended with fill bytes
//! key[key_size]
//! ```
//!
//! # Security
//!
//! The key is a public function of time and the fill pattern. The first 8
//! bytes are the bucket index and therefore guessable, so secrecy rests on the
//! fill bytes alone. Treat this pool as key agreement between parties that
//! already share the configuration.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::KeyPool;
use crate::{error::ConfigError, key::DynamicKey};

/// Upper bound on the window size.
///
/// A window of W produces 2W+1 candidates per decrypt; this keeps the trial
/// count bounded regardless of configuration.
pub const MAX_WINDOW_SIZE: u32 = 1024;

/// Upper bound on the derived key length in bytes.
pub const MAX_KEY_SIZE: usize = 64;

/// Serializable time pool configuration.
///
/// `Debug` prints the fill length only.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBasedPoolConfig {
    /// Derived key length in bytes
    pub key_size: usize,
    /// Buckets tried on each side of the current one
    pub window_size: u32,
    /// Bucket width in milliseconds
    pub interval_millis: i64,
    /// Pattern filling key bytes beyond the 8-byte bucket prefix
    pub fill_bytes: Vec<u8>,
}

impl fmt::Debug for TimeBasedPoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeBasedPoolConfig")
            .field("key_size", &self.key_size)
            .field("window_size", &self.window_size)
            .field("interval_millis", &self.interval_millis)
            .field("fill_len", &self.fill_bytes.len())
            .finish()
    }
}

/// Expands a bucket index into key bytes.
///
/// The fill pattern is zeroized on drop and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyGenerator {
    fill: Vec<u8>,
}

impl KeyGenerator {
    /// Create a generator with the given fill pattern.
    ///
    /// # Errors
    ///
    /// - `EmptyFillBytes`: the pattern is empty
    pub fn new(fill: &[u8]) -> Result<Self, ConfigError> {
        if fill.is_empty() {
            return Err(ConfigError::EmptyFillBytes);
        }
        Ok(Self { fill: fill.to_vec() })
    }

    /// Derive `key_size` bytes from `seed`.
    ///
    /// The seed's 8 big-endian bytes come first (truncated when `key_size` is
    /// smaller). Byte `i >= 8` is `fill[i % fill.len()]`.
    pub fn generate(&self, seed: i64, key_size: usize) -> Vec<u8> {
        let base = seed.to_be_bytes();
        let mut key = Vec::with_capacity(key_size);
        key.extend_from_slice(&base[..key_size.min(base.len())]);
        for index in base.len()..key_size {
            key.push(self.fill[index % self.fill.len()]);
        }
        key
    }
}

impl fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyGenerator").field("fill_len", &self.fill.len()).finish_non_exhaustive()
    }
}

impl Drop for KeyGenerator {
    fn drop(&mut self) {
        self.fill.zeroize();
    }
}

/// Pool deriving keys from the synchronization parameter (a timestamp).
///
/// # Invariants
///
/// - `decrypt_keys(t)` has exactly `2 * window_size + 1` entries
/// - `decrypt_keys(t)[0] == encrypt_key(t)`
/// - Offsets are ordered `0, +1, -1, +2, -2, ...` (most likely first)
/// - Stateless: safe for unsynchronized concurrent use
#[derive(Debug, Clone)]
pub struct TimeBasedPool {
    generator: KeyGenerator,
    key_size: usize,
    window_size: u32,
    interval_millis: i64,
}

impl TimeBasedPool {
    /// Create a pool from a configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidKeySize`: `key_size` outside `1..=MAX_KEY_SIZE`
    /// - `InvalidWindowSize`: `window_size` outside `1..=MAX_WINDOW_SIZE`
    /// - `InvalidInterval`: `interval_millis` is not positive
    /// - `EmptyFillBytes`: `fill_bytes` is empty
    pub fn new(config: TimeBasedPoolConfig) -> Result<Self, ConfigError> {
        if config.key_size == 0 || config.key_size > MAX_KEY_SIZE {
            return Err(ConfigError::InvalidKeySize { key_size: config.key_size });
        }
        if config.window_size == 0 || config.window_size > MAX_WINDOW_SIZE {
            return Err(ConfigError::InvalidWindowSize { window_size: config.window_size });
        }
        if config.interval_millis <= 0 {
            return Err(ConfigError::InvalidInterval { interval_millis: config.interval_millis });
        }

        Ok(Self {
            generator: KeyGenerator::new(&config.fill_bytes)?,
            key_size: config.key_size,
            window_size: config.window_size,
            interval_millis: config.interval_millis,
        })
    }

    /// Start a fluent builder for keys of `key_size` bytes.
    pub fn builder(key_size: usize) -> TimeBasedPoolBuilder {
        TimeBasedPoolBuilder::new(key_size)
    }

    /// Derived key length in bytes.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Buckets tried on each side of the current one.
    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    /// Bucket width.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_millis.unsigned_abs())
    }

    /// Maximum clock drift the window tolerates.
    pub fn tolerance(&self) -> Duration {
        self.interval() * self.window_size
    }

    /// Bucket index for `timestamp` shifted by `offset` intervals.
    ///
    /// Uses floor division so buckets keep a uniform width across zero:
    /// `-1` falls in bucket `-1`, not `0`. Arithmetic saturates at the `i64`
    /// bounds.
    pub fn bucket(&self, timestamp: i64, offset: i64) -> i64 {
        let shift = offset.saturating_mul(self.interval_millis);
        timestamp.saturating_add(shift).div_euclid(self.interval_millis)
    }

    /// Derive the key for `timestamp` shifted by `offset` intervals.
    ///
    /// Tagged `"{timestamp}:{offset}"`.
    pub fn derive_at(&self, timestamp: i64, offset: i64) -> DynamicKey {
        let bucket = self.bucket(timestamp, offset);
        tracing::trace!(timestamp, offset, bucket, "deriving time-based key");
        DynamicKey::new(
            format!("{timestamp}:{offset}"),
            self.generator.generate(bucket, self.key_size),
        )
    }
}

impl KeyPool for TimeBasedPool {
    fn encrypt_key(&self, param: i64) -> Option<DynamicKey> {
        Some(self.derive_at(param, 0))
    }

    fn decrypt_keys(&self, param: i64) -> Vec<DynamicKey> {
        let window = i64::from(self.window_size);
        let mut keys = Vec::with_capacity(2 * self.window_size as usize + 1);
        keys.push(self.derive_at(param, 0));
        for offset in 1..=window {
            keys.push(self.derive_at(param, offset));
            keys.push(self.derive_at(param, -offset));
        }
        keys
    }
}

/// Fluent construction of a [`TimeBasedPool`].
#[derive(Clone)]
pub struct TimeBasedPoolBuilder {
    key_size: usize,
    window_size: Option<u32>,
    interval_millis: Option<i64>,
    fill_bytes: Option<Vec<u8>>,
}

impl fmt::Debug for TimeBasedPoolBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeBasedPoolBuilder")
            .field("key_size", &self.key_size)
            .field("window_size", &self.window_size)
            .field("interval_millis", &self.interval_millis)
            .field("fill_len", &self.fill_bytes.as_ref().map(Vec::len))
            .finish()
    }
}

impl TimeBasedPoolBuilder {
    /// Start a builder for keys of `key_size` bytes.
    pub fn new(key_size: usize) -> Self {
        Self { key_size, window_size: None, interval_millis: None, fill_bytes: None }
    }

    /// Buckets tried on each side of the current one.
    #[must_use]
    pub fn window_size(mut self, window_size: u32) -> Self {
        self.window_size = Some(window_size);
        self
    }

    /// Bucket width (millisecond resolution).
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval_millis = Some(i64::try_from(interval.as_millis()).unwrap_or(i64::MAX));
        self
    }

    /// Bucket width in whole seconds.
    #[must_use]
    pub fn interval_secs(self, seconds: u64) -> Self {
        self.interval(Duration::from_secs(seconds))
    }

    /// Pattern filling key bytes beyond the 8-byte bucket prefix.
    #[must_use]
    pub fn fill_bytes(mut self, fill_bytes: impl Into<Vec<u8>>) -> Self {
        self.fill_bytes = Some(fill_bytes.into());
        self
    }

    /// Collect the settings into a configuration.
    ///
    /// # Errors
    ///
    /// - `MissingField`: window size, interval or fill bytes not set
    pub fn config(self) -> Result<TimeBasedPoolConfig, ConfigError> {
        Ok(TimeBasedPoolConfig {
            key_size: self.key_size,
            window_size: self.window_size.ok_or(ConfigError::MissingField { field: "window_size" })?,
            interval_millis: self
                .interval_millis
                .ok_or(ConfigError::MissingField { field: "interval" })?,
            fill_bytes: self.fill_bytes.ok_or(ConfigError::MissingField { field: "fill_bytes" })?,
        })
    }

    /// Validate and build the pool.
    pub fn build(self) -> Result<TimeBasedPool, ConfigError> {
        TimeBasedPool::new(self.config()?)
    }
}
