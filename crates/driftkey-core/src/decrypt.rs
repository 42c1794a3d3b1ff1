//! Trial decryption over candidate keys and IVs
//!
//! The decrypting side does not know which key (or which time bucket) the
//! encrypting side used. It enumerates every candidate, runs the cipher, and
//! accepts the first plaintext whose checksum matches the blob's.
//!
//! # Enumeration order
//!
//! ```text
//! keys = key_pool.decrypt_keys(param)      empty → NoKeyAvailable
//! ivs  = iv_pool.decrypt_keys(param)       empty → [none]
//!
//! for key in keys:                         key-major
//!     for iv in ivs:
//!         trial(key, iv)                   appended to `tried`
//!         matched → return success         no further trials
//! return exhausted
//! ```
//!
//! The order is observable through [`DynamicDecryptResult::tried`] and is part
//! of the contract.
//!
//! # Failure classes
//!
//! - Key pool empty: configuration error, returned as `Err`
//! - Cipher configuration error (unsupported mode, IV/mode mismatch): aborts
//!   the search, returned as `Err`
//! - Any other cipher failure (bad padding, wrong key length): one failed
//!   trial, the search continues
//! - Checksum mismatch: one unmatched trial, the search continues
//! - No match at all: `Ok` with an exhausted result

use std::fmt;

use driftkey_crypto::Transformation;

use crate::{
    blob::CipherBlob,
    builder::{Components, TrialDecryptorBuilder},
    error::DecryptError,
    key::DynamicKey,
    result::{DecryptInfo, DynamicDecryptResult},
};

/// Decrypts [`CipherBlob`]s by trying every candidate key and IV.
///
/// Holds no mutable state: one instance can serve any number of concurrent
/// callers.
#[derive(Clone)]
pub struct TrialDecryptor {
    components: Components,
}

impl TrialDecryptor {
    pub(crate) fn new(components: Components) -> Self {
        Self { components }
    }

    /// Start a builder for the named transformation.
    ///
    /// Names are validated by [`TrialDecryptorBuilder::build`].
    pub fn builder(
        algorithm: impl Into<String>,
        mode: impl Into<String>,
        padding: impl Into<String>,
    ) -> TrialDecryptorBuilder {
        TrialDecryptorBuilder::new(algorithm, mode, padding)
    }

    /// Cipher transformation used for every trial.
    pub fn transformation(&self) -> &Transformation {
        &self.components.transformation
    }

    /// Decrypt at the parameter read from the configured supplier.
    ///
    /// # Errors
    ///
    /// - `NoKeyAvailable`: the key pool has no candidates for the parameter
    /// - `Cipher`: the cipher rejected the configuration
    pub fn decrypt(&self, blob: &CipherBlob) -> Result<DynamicDecryptResult, DecryptError> {
        self.decrypt_at(blob, self.components.parameter_supplier.parameter())
    }

    /// Decrypt at an explicit synchronization parameter.
    pub fn decrypt_at(
        &self,
        blob: &CipherBlob,
        parameter: i64,
    ) -> Result<DynamicDecryptResult, DecryptError> {
        let keys = self.components.key_pool.decrypt_keys(parameter);
        if keys.is_empty() {
            tracing::error!(parameter, "key pool returned no decrypt candidates");
            return Err(DecryptError::NoKeyAvailable { parameter });
        }

        let ivs = self.components.iv_pool.decrypt_keys(parameter);
        let iv_choices: Vec<Option<&DynamicKey>> =
            if ivs.is_empty() { vec![None] } else { ivs.iter().map(Some).collect() };

        let mut tried = Vec::with_capacity(keys.len() * iv_choices.len());
        for key in &keys {
            for &iv in &iv_choices {
                let info = self.trial(blob, key, iv)?;
                let matched = info.matched();
                tried.push(info);

                if matched {
                    tracing::debug!(
                        parameter,
                        key_tag = key.tag(),
                        iv_tag = iv.map(DynamicKey::tag),
                        trials = tried.len(),
                        "candidate matched"
                    );
                    return Ok(DynamicDecryptResult::matched(tried));
                }
            }
        }

        tracing::warn!(
            parameter,
            keys = keys.len(),
            ivs = ivs.len(),
            trials = tried.len(),
            "no candidate matched"
        );
        Ok(DynamicDecryptResult::exhausted(tried))
    }

    fn trial(
        &self,
        blob: &CipherBlob,
        key: &DynamicKey,
        iv: Option<&DynamicKey>,
    ) -> Result<DecryptInfo, DecryptError> {
        let iv_tag = iv.map(DynamicKey::tag);
        let outcome = self.components.cipher.decrypt(
            &self.components.transformation,
            key.key(),
            iv.map(DynamicKey::key),
            blob.ciphertext(),
        );

        match outcome {
            Ok(plaintext) => {
                let checksum = (self.components.checksum)(&plaintext);
                let info =
                    DecryptInfo::decrypted(key.tag(), iv_tag, blob.checksum(), checksum, plaintext);
                tracing::debug!(
                    key_tag = key.tag(),
                    iv_tag,
                    matched = info.matched(),
                    "trial decrypted"
                );
                Ok(info)
            },
            Err(e) if e.is_configuration() => {
                tracing::error!(
                    transformation = %self.components.transformation,
                    error = %e,
                    "cipher rejected configuration, aborting search"
                );
                Err(DecryptError::Cipher(e))
            },
            Err(e) => {
                tracing::debug!(key_tag = key.tag(), iv_tag, error = %e, "trial failed");
                Ok(DecryptInfo::failed(key.tag(), iv_tag, e))
            },
        }
    }
}

impl fmt::Debug for TrialDecryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrialDecryptor")
            .field("transformation", &self.components.transformation)
            .finish_non_exhaustive()
    }
}
