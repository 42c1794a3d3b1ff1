//! Pool without keys

use super::KeyPool;
use crate::key::DynamicKey;

/// Pool that never yields a key.
///
/// As an IV pool it means "decrypt without an IV". As a key pool every
/// decrypt fails with [`crate::DecryptError::NoKeyAvailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPool;

impl EmptyPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self
    }
}

impl KeyPool for EmptyPool {
    fn encrypt_key(&self, _param: i64) -> Option<DynamicKey> {
        None
    }

    fn decrypt_keys(&self, _param: i64) -> Vec<DynamicKey> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_nothing() {
        let pool = EmptyPool::new();
        assert!(pool.encrypt_key(0).is_none());
        assert!(pool.decrypt_keys(i64::MAX).is_empty());
    }
}
