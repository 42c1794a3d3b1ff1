//! Ciphertext as received, before any key has been tried

/// Ciphertext plus the checksum of the plaintext it should decrypt to.
///
/// The checksum is unverified until a trial reproduces it. Both buffers are
/// kept separately; there is no serialized layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherBlob {
    ciphertext: Vec<u8>,
    checksum: Vec<u8>,
}

impl CipherBlob {
    /// Create a blob from ciphertext and the expected plaintext checksum.
    pub fn new(ciphertext: impl Into<Vec<u8>>, checksum: impl Into<Vec<u8>>) -> Self {
        Self { ciphertext: ciphertext.into(), checksum: checksum.into() }
    }

    /// Create a blob with an empty checksum.
    ///
    /// Only a checksum function returning an empty digest can match it.
    pub fn without_checksum(ciphertext: impl Into<Vec<u8>>) -> Self {
        Self::new(ciphertext, Vec::new())
    }

    /// Raw ciphertext.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Expected plaintext checksum.
    pub fn checksum(&self) -> &[u8] {
        &self.checksum
    }

    /// Split into `(ciphertext, checksum)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.ciphertext, self.checksum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_are_kept_separate() {
        let blob = CipherBlob::new(vec![1u8, 2, 3], vec![9u8]);
        assert_eq!(blob.ciphertext(), &[1, 2, 3]);
        assert_eq!(blob.into_parts(), (vec![1, 2, 3], vec![9]));

        assert!(CipherBlob::without_checksum(vec![0u8; 16]).checksum().is_empty());
    }
}
