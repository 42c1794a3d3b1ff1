//! Block cipher primitive
//!
//! Encrypts and decrypts with a named transformation (`ALGORITHM/MODE/PADDING`)
//! given raw key bytes and an optional IV.
//!
//! # Architecture
//!
//! ```text
//! "SM4/CBC/PKCS7Padding"
//!        │
//!        ▼ parse
//! Transformation { algorithm, mode, padding }
//!        │
//!        ▼ CipherPrimitive (injected)
//! SoftwareCipher → RustCrypto block cipher + mode
//! ```
//!
//! # Error Classes
//!
//! - Configuration: unsupported names, invalid mode/padding pairs, IV presence
//!   that contradicts the mode. Independent of key material.
//! - Per-attempt: wrong key length, wrong IV length, unaligned input, bad
//!   padding. Expected when trying the wrong key.

pub mod error;
pub mod software;
pub mod transformation;

pub use error::CipherError;
pub use software::{CipherPrimitive, SoftwareCipher};
pub use transformation::{Algorithm, BLOCK_SIZE, Mode, Padding, Transformation};
