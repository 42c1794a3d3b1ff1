//! Plaintext checksum functions
//!
//! A checksum binds a ciphertext to the plaintext it was produced from,
//! independently of whether the cipher mode authenticates anything. The
//! decrypting side recomputes it over each candidate plaintext and compares
//! byte-for-byte.

use std::sync::Arc;

use sha2::{Digest, Sha256};

/// Shared, thread-safe checksum function over plaintext bytes.
///
/// Must be pure and deterministic: the encrypting and decrypting side call it
/// independently and compare the outputs.
pub type ChecksumFn = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// SHA-256 digest of `data` (32 bytes).
pub fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

/// Full SHA-256 digest as a [`ChecksumFn`].
pub fn sha256_checksum() -> ChecksumFn {
    Arc::new(sha256)
}

/// SHA-256 digest truncated to the first `len` bytes.
///
/// `len` above 32 yields the full digest.
pub fn truncated_sha256(len: usize) -> ChecksumFn {
    Arc::new(move |data: &[u8]| {
        let mut digest = sha256(data);
        digest.truncate(len);
        digest
    })
}

/// First `len` plaintext bytes, zero-filled when the plaintext is shorter.
///
/// Not a digest: it only detects garbage output from a wrong key. Useful in
/// tests where the expected checksum must be predictable.
pub fn prefix(len: usize) -> ChecksumFn {
    Arc::new(move |data: &[u8]| {
        let mut out = data[..data.len().min(len)].to_vec();
        out.resize(len, 0);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn truncated_keeps_digest_prefix() {
        let checksum = truncated_sha256(8);
        let out = checksum(b"abc");
        assert_eq!(hex::encode(out), "ba7816bf8f01cfea");
    }

    #[test]
    fn truncated_beyond_digest_is_full_digest() {
        let checksum = truncated_sha256(64);
        assert_eq!(checksum(b"abc").len(), 32);
    }

    #[test]
    fn prefix_pads_short_input() {
        let checksum = prefix(8);
        assert_eq!(checksum(b"hello"), vec![b'h', b'e', b'l', b'l', b'o', 0, 0, 0]);
        assert_eq!(checksum(b"hello, world"), b"hello, w".to_vec());
    }

    #[test]
    fn checksum_is_deterministic() {
        let checksum = sha256_checksum();
        assert_eq!(checksum(b"payload"), checksum(b"payload"));
        assert_ne!(checksum(b"payload"), checksum(b"payloae"));
    }
}
