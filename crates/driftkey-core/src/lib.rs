//! driftkey Trial Decryption
//!
//! Decrypts ciphertext when the receiver cannot know in advance which of
//! several currently valid keys the sender used: a key from a rotation set,
//! or a key derived from a clock that may have drifted.
//!
//! # Flow
//!
//! ```text
//! ParameterSupplier → param (epoch millis)
//!        │
//!        ▼
//! KeyPool::decrypt_keys(param) × IV pool::decrypt_keys(param)
//!        │
//!        ▼
//! CipherPrimitive::decrypt(key, iv, ciphertext)     per trial
//!        │
//!        ▼
//! checksum(plaintext) == blob.checksum ?            first match wins
//!        │
//!        ▼
//! DynamicDecryptResult { tried, success }
//! ```
//!
//! The encrypting side mirrors this with [`DynamicEncryptor`], taking
//! `encrypt_key(param)` from the same kind of pools.
//!
//! # Security
//!
//! Integrity:
//! - The supported cipher modes do not authenticate; the checksum is the only
//!   thing telling a correct plaintext from garbage
//! - A short (truncated) checksum raises the chance that a wrong key produces
//!   a false match
//!
//! Key material:
//! - [`DynamicKey`] bytes are zeroized on drop and never logged
//! - Trial records carry key and IV tags, never key bytes
//!
//! Time-based keys:
//! - Derived from the time bucket and a shared fill pattern; anyone holding
//!   the configuration can derive every key

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod blob;
pub mod builder;
pub mod decrypt;
pub mod encrypt;
pub mod env;
pub mod error;
pub mod key;
pub mod pool;
pub mod result;

pub use blob::CipherBlob;
pub use builder::TrialDecryptorBuilder;
pub use decrypt::TrialDecryptor;
pub use driftkey_crypto::{
    Algorithm, ChecksumFn, CipherError, CipherPrimitive, Mode, Padding, SoftwareCipher,
    Transformation,
};
pub use encrypt::DynamicEncryptor;
pub use env::{FixedParameter, ParameterSupplier, SystemClock};
pub use error::{ConfigError, DecryptError, EncryptError};
pub use key::DynamicKey;
pub use pool::{
    EmptyPool, FixedPool, KeyGenerator, KeyPool, MAX_KEY_SIZE, MAX_WINDOW_SIZE, RotationPool,
    TimeBasedPool, TimeBasedPoolBuilder, TimeBasedPoolConfig,
};
pub use result::{DecryptInfo, DynamicDecryptResult};
