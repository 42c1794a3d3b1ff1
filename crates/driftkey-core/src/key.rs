//! Tagged key material handed out by key pools

use std::fmt;

use zeroize::Zeroize;

/// A candidate key (or IV) produced by a [`crate::KeyPool`].
///
/// The tag is an opaque identifier for audit and logging. It is never used to
/// look a key up. Key bytes are zeroized on drop and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct DynamicKey {
    tag: String,
    key: Vec<u8>,
}

impl DynamicKey {
    /// Create a key with the given tag.
    pub fn new(tag: impl Into<String>, key: impl Into<Vec<u8>>) -> Self {
        Self { tag: tag.into(), key: key.into() }
    }

    /// Audit tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Raw key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

impl fmt::Debug for DynamicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicKey")
            .field("tag", &self.tag)
            .field("len", &self.key.len())
            .finish_non_exhaustive()
    }
}

// Implement Drop to zeroize key material
impl Drop for DynamicKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
