//! Round-robin pool over a fixed key set

use std::sync::atomic::{AtomicU64, Ordering};

use super::KeyPool;
use crate::{error::ConfigError, key::DynamicKey};

/// Pool of N keys used in rotation.
///
/// Encryption cycles through the keys with a shared atomic counter; decryption
/// always returns every key in insertion order, so any key handed out by any
/// past rotation step can be recovered.
///
/// # Concurrency
///
/// `fetch_add` guarantees no two callers observe the same counter value. It
/// does not guarantee strict alternation between concurrent callers, only that
/// the pool keeps cycling through all keys.
#[derive(Debug)]
pub struct RotationPool {
    keys: Vec<DynamicKey>,
    next: AtomicU64,
}

impl RotationPool {
    /// Create a pool from tagged keys.
    ///
    /// # Errors
    ///
    /// - `EmptyRotation`: no keys given
    pub fn new(keys: impl IntoIterator<Item = DynamicKey>) -> Result<Self, ConfigError> {
        let keys: Vec<DynamicKey> = keys.into_iter().collect();
        if keys.is_empty() {
            return Err(ConfigError::EmptyRotation);
        }
        Ok(Self { keys, next: AtomicU64::new(0) })
    }

    /// Create a pool from raw keys, tagging each with its index.
    pub fn from_keys<I, K>(keys: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = K>,
        K: Into<Vec<u8>>,
    {
        Self::new(
            keys.into_iter().enumerate().map(|(index, key)| DynamicKey::new(index.to_string(), key)),
        )
    }

    /// Number of keys in rotation.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false: construction rejects empty key sets.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyPool for RotationPool {
    fn encrypt_key(&self, _param: i64) -> Option<DynamicKey> {
        // Wraps at u64::MAX; the modulo keeps the position in range
        let step = self.next.fetch_add(1, Ordering::Relaxed);
        let position = (step % self.keys.len() as u64) as usize;
        self.keys.get(position).cloned()
    }

    fn decrypt_keys(&self, _param: i64) -> Vec<DynamicKey> {
        self.keys.clone()
    }
}
