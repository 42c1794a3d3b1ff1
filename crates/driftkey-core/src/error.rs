//! Error types for driftkey core.
//!
//! Strongly-typed errors for the two phases: configuration errors raised while
//! assembling pools and decryptors, and call-time errors raised by
//! encrypt/decrypt.
//!
//! A trial that decrypts to the wrong checksum, or a search that exhausts all
//! candidates, is NOT an error: both are recorded in
//! [`crate::DynamicDecryptResult`].

use driftkey_crypto::CipherError;
use thiserror::Error;

/// Errors raised while building pools, decryptors and encryptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required builder field was never set
    #[error("missing required field: {field}")]
    MissingField {
        /// Field name
        field: &'static str,
    },

    /// Name field was set to an empty string
    #[error("{field} must not be empty")]
    EmptyField {
        /// Field name
        field: &'static str,
    },

    /// Transformation names do not resolve to a supported cipher
    #[error("invalid transformation: {0}")]
    Transformation(#[from] CipherError),

    /// Derived key size outside `1..=MAX_KEY_SIZE`
    #[error("invalid key size: {key_size}")]
    InvalidKeySize {
        /// Requested key size in bytes
        key_size: usize,
    },

    /// Time window outside `1..=MAX_WINDOW_SIZE`
    #[error("invalid window size: {window_size}")]
    InvalidWindowSize {
        /// Requested window size
        window_size: u32,
    },

    /// Time bucket interval must be positive
    #[error("invalid interval: {interval_millis}ms")]
    InvalidInterval {
        /// Requested interval in milliseconds
        interval_millis: i64,
    },

    /// Fill pattern for derived keys is empty
    #[error("fill bytes must not be empty")]
    EmptyFillBytes,

    /// Rotation pool built from zero keys
    #[error("rotation pool requires at least one key")]
    EmptyRotation,
}

/// Errors raised by [`crate::TrialDecryptor::decrypt`] and result accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptError {
    /// Key pool produced no candidates for this parameter
    #[error("no key available for parameter {parameter}")]
    NoKeyAvailable {
        /// Synchronization parameter the pool was queried with
        parameter: i64,
    },

    /// Cipher primitive rejected the configuration itself
    #[error("cipher configuration error: {0}")]
    Cipher(CipherError),

    /// Required a match from a result that has none
    #[error("no candidate matched after {tried} trials")]
    NotMatched {
        /// Number of trials recorded in the result
        tried: usize,
    },
}

impl DecryptError {
    /// Returns true if this error stems from configuration.
    ///
    /// Configuration errors abort the search before or during the first trial
    /// and will recur on every call until the setup is fixed. `NotMatched` is
    /// a caller bug: the result should have been checked first.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::NoKeyAvailable { .. } | Self::Cipher(_) => true,
            Self::NotMatched { .. } => false,
        }
    }
}

/// Errors raised by [`crate::DynamicEncryptor::encrypt`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncryptError {
    /// Key pool has no encryption key for this parameter
    #[error("no key available for parameter {parameter}")]
    NoKeyAvailable {
        /// Synchronization parameter the pool was queried with
        parameter: i64,
    },

    /// Cipher primitive failed
    #[error("encryption failed: {0}")]
    Cipher(#[from] CipherError),
}
