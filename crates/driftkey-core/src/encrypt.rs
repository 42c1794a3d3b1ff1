//! Encrypting side of a pool-based exchange

use std::fmt;

use driftkey_crypto::Transformation;

use crate::{blob::CipherBlob, builder::Components, error::EncryptError, key::DynamicKey};

/// Produces [`CipherBlob`]s a matching [`crate::TrialDecryptor`] can recover.
///
/// Uses `encrypt_key` of the key and IV pools. A rotation pool advances its
/// counter on every call.
#[derive(Clone)]
pub struct DynamicEncryptor {
    components: Components,
}

impl DynamicEncryptor {
    pub(crate) fn new(components: Components) -> Self {
        Self { components }
    }

    /// Cipher transformation used for encryption.
    pub fn transformation(&self) -> &Transformation {
        &self.components.transformation
    }

    /// Encrypt at the parameter read from the configured supplier.
    ///
    /// # Errors
    ///
    /// - `NoKeyAvailable`: the key pool has no encryption key
    /// - `Cipher`: the cipher failed (wrong key length, missing IV)
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<CipherBlob, EncryptError> {
        self.encrypt_at(plaintext, self.components.parameter_supplier.parameter())
    }

    /// Encrypt at an explicit synchronization parameter.
    pub fn encrypt_at(&self, plaintext: &[u8], parameter: i64) -> Result<CipherBlob, EncryptError> {
        let key = self
            .components
            .key_pool
            .encrypt_key(parameter)
            .ok_or(EncryptError::NoKeyAvailable { parameter })?;
        let iv = self.components.iv_pool.encrypt_key(parameter);

        let ciphertext = self.components.cipher.encrypt(
            &self.components.transformation,
            key.key(),
            iv.as_ref().map(DynamicKey::key),
            plaintext,
        )?;
        let checksum = (self.components.checksum)(plaintext);

        tracing::debug!(
            parameter,
            key_tag = key.tag(),
            iv_tag = iv.as_ref().map(DynamicKey::tag),
            "encrypted"
        );
        Ok(CipherBlob::new(ciphertext, checksum))
    }
}

impl fmt::Debug for DynamicEncryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicEncryptor")
            .field("transformation", &self.components.transformation)
            .finish_non_exhaustive()
    }
}
