//! Single-key pool

use super::KeyPool;
use crate::key::DynamicKey;

/// Tag used when no id is given.
pub const DEFAULT_ID: u64 = 0;

/// Pool holding one key, returned for every parameter.
#[derive(Debug, Clone)]
pub struct FixedPool {
    key: DynamicKey,
}

impl FixedPool {
    /// Create a pool tagged with [`DEFAULT_ID`].
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self::with_id(DEFAULT_ID, key)
    }

    /// Create a pool whose key is tagged with `id`.
    pub fn with_id(id: u64, key: impl Into<Vec<u8>>) -> Self {
        Self { key: DynamicKey::new(id.to_string(), key) }
    }

    /// Create a pool from an already tagged key.
    pub fn from_key(key: DynamicKey) -> Self {
        Self { key }
    }
}

impl KeyPool for FixedPool {
    fn encrypt_key(&self, _param: i64) -> Option<DynamicKey> {
        Some(self.key.clone())
    }

    fn decrypt_keys(&self, _param: i64) -> Vec<DynamicKey> {
        vec![self.key.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_for_every_parameter() {
        let pool = FixedPool::new(vec![7u8; 16]);

        for param in [i64::MIN, -1, 0, 1, 1_700_000_000_000, i64::MAX] {
            let encrypt = pool.encrypt_key(param).unwrap();
            let decrypt = pool.decrypt_keys(param);

            assert_eq!(decrypt.len(), 1);
            assert_eq!(decrypt[0], encrypt);
            assert_eq!(encrypt.tag(), "0");
        }
    }

    #[test]
    fn custom_id_becomes_tag() {
        let pool = FixedPool::with_id(42, vec![1u8; 16]);
        assert_eq!(pool.decrypt_keys(0)[0].tag(), "42");
    }
}
