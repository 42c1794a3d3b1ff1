//! Error types for block cipher operations

use thiserror::Error;

use super::transformation::{Mode, Padding};

/// Errors from the block cipher primitive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Algorithm name is not recognized
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Block mode name is not recognized
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    /// Padding name is not recognized
    #[error("unsupported padding: {0}")]
    UnsupportedPadding(String),

    /// Transformation string is not `ALGORITHM/MODE/PADDING`
    #[error("malformed transformation: {0}")]
    MalformedTransformation(String),

    /// Mode and padding cannot be combined
    #[error("{mode} does not support {padding}")]
    UnsupportedCombination {
        /// Block mode
        mode: Mode,
        /// Padding
        padding: Padding,
    },

    /// Mode requires an IV but none was supplied
    #[error("{mode} requires an IV")]
    MissingIv {
        /// Block mode
        mode: Mode,
    },

    /// An IV was supplied to a mode that takes none
    #[error("{mode} does not use an IV")]
    UnexpectedIv {
        /// Block mode
        mode: Mode,
    },

    /// Key length does not fit the algorithm
    #[error("invalid key length for {algorithm}: {actual} bytes")]
    InvalidKeyLength {
        /// Algorithm name
        algorithm: &'static str,
        /// Actual key length
        actual: usize,
    },

    /// IV length does not match the block size
    #[error("invalid IV length: expected {expected}, got {actual}")]
    InvalidIvLength {
        /// Expected IV length (block size)
        expected: usize,
        /// Actual IV length
        actual: usize,
    },

    /// Input is not a whole number of blocks for an unpadded block mode
    #[error("input length {len} is not a multiple of block size {block_size}")]
    UnalignedInput {
        /// Input length
        len: usize,
        /// Cipher block size
        block_size: usize,
    },

    /// Padding check failed after decryption (usually a wrong key or IV)
    #[error("bad padding")]
    BadPadding,
}

impl CipherError {
    /// Returns true if this error is a configuration error.
    ///
    /// Configuration errors are independent of the key material: every key
    /// would hit them. Everything else is specific to one key/IV attempt.
    ///
    /// `MissingIv` and `UnexpectedIv` count as configuration: an IV pool that
    /// does not fit the mode aborts the whole search instead of being
    /// recorded as one failed trial per key.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::UnsupportedAlgorithm(_)
            | Self::UnsupportedMode(_)
            | Self::UnsupportedPadding(_)
            | Self::MalformedTransformation(_)
            | Self::UnsupportedCombination { .. }
            | Self::MissingIv { .. }
            | Self::UnexpectedIv { .. } => true,

            Self::InvalidKeyLength { .. }
            | Self::InvalidIvLength { .. }
            | Self::UnalignedInput { .. }
            | Self::BadPadding => false,
        }
    }
}
