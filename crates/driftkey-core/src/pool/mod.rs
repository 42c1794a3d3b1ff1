//! Key pools: sources of candidate keys for a synchronization parameter
//!
//! The encrypting side asks a pool for ONE key, the decrypting side asks the
//! same kind of pool for ALL keys that might have been used, in the order
//! they should be tried.
//!
//! # Variants
//!
//! ```text
//! FixedPool      one key, any parameter
//! RotationPool   N keys; encrypt round-robins, decrypt returns all N
//! TimeBasedPool  keys derived from time buckets; decrypt returns a window
//! EmptyPool      nothing (an IV pool for modes without an IV)
//! ```
//!
//! # Concurrency
//!
//! Pools are shared across threads. The only mutable state is the rotation
//! counter, which is a single atomic.

pub mod empty;
pub mod fixed;
pub mod rotation;
pub mod time_based;

use std::sync::Arc;

pub use empty::EmptyPool;
pub use fixed::FixedPool;
pub use rotation::RotationPool;
pub use time_based::{
    KeyGenerator, MAX_KEY_SIZE, MAX_WINDOW_SIZE, TimeBasedPool, TimeBasedPoolBuilder,
    TimeBasedPoolConfig,
};

use crate::key::DynamicKey;

/// A source of candidate keys.
pub trait KeyPool: Send + Sync {
    /// Key the encrypting side should use, or `None` if the pool has none.
    fn encrypt_key(&self, param: i64) -> Option<DynamicKey>;

    /// Every key the decrypting side should try, most likely first.
    ///
    /// An empty list means no key is available for `param`.
    fn decrypt_keys(&self, param: i64) -> Vec<DynamicKey>;
}

impl<P: KeyPool + ?Sized> KeyPool for Arc<P> {
    fn encrypt_key(&self, param: i64) -> Option<DynamicKey> {
        (**self).encrypt_key(param)
    }

    fn decrypt_keys(&self, param: i64) -> Vec<DynamicKey> {
        (**self).decrypt_keys(param)
    }
}
