//! driftkey Cryptographic Primitives
//!
//! Cryptographic building blocks for driftkey. Pure functions with
//! deterministic outputs: the same transformation, key, IV and input always
//! produce the same result.
//!
//! # Components
//!
//! - [`block_cipher`]: symmetric block cipher selected by a transformation
//!   string such as `SM4/CBC/PKCS7Padding`, behind the [`CipherPrimitive`]
//!   trait so callers inject it rather than reaching for a global provider
//! - [`checksum`]: plaintext checksum functions used to tell a correct
//!   decryption from garbage
//!
//! # Security
//!
//! Unauthenticated modes:
//! - ECB, CBC, CFB and OFB provide confidentiality only
//! - A wrong key usually surfaces as bad padding, but stream modes and
//!   `NoPadding` decrypt "successfully" to garbage under any key
//! - Integrity therefore comes from the checksum, never from the mode

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod block_cipher;
pub mod checksum;

pub use block_cipher::{
    Algorithm, BLOCK_SIZE, CipherError, CipherPrimitive, Mode, Padding, SoftwareCipher,
    Transformation,
};
pub use checksum::{ChecksumFn, prefix, sha256, sha256_checksum, truncated_sha256};
