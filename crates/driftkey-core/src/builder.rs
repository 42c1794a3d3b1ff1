//! Assembly and validation of decryptors and encryptors
//!
//! All checks run once in [`TrialDecryptorBuilder::build`]: a
//! [`TrialDecryptor`] that exists is fully configured.
//!
//! # Defaults
//!
//! - IV pool: [`EmptyPool`] (trials run without an IV)
//! - Parameter supplier: [`SystemClock`]
//! - Cipher: [`SoftwareCipher`]

use std::sync::Arc;

use driftkey_crypto::{ChecksumFn, CipherPrimitive, SoftwareCipher, Transformation};

use crate::{
    decrypt::TrialDecryptor,
    encrypt::DynamicEncryptor,
    env::{ParameterSupplier, SystemClock},
    error::ConfigError,
    pool::{EmptyPool, KeyPool},
};

/// Validated collaborators shared by the decrypting and encrypting side.
#[derive(Clone)]
pub(crate) struct Components {
    pub(crate) transformation: Transformation,
    pub(crate) key_pool: Arc<dyn KeyPool>,
    pub(crate) iv_pool: Arc<dyn KeyPool>,
    pub(crate) checksum: ChecksumFn,
    pub(crate) parameter_supplier: Arc<dyn ParameterSupplier>,
    pub(crate) cipher: Arc<dyn CipherPrimitive>,
}

/// Builder for [`TrialDecryptor`] and [`DynamicEncryptor`].
///
/// Required: non-empty algorithm, mode and padding names, a key pool and a
/// checksum function.
#[must_use]
pub struct TrialDecryptorBuilder {
    algorithm: String,
    mode: String,
    padding: String,
    key_pool: Option<Arc<dyn KeyPool>>,
    iv_pool: Option<Arc<dyn KeyPool>>,
    checksum: Option<ChecksumFn>,
    parameter_supplier: Option<Arc<dyn ParameterSupplier>>,
    cipher: Option<Arc<dyn CipherPrimitive>>,
}

impl TrialDecryptorBuilder {
    /// Start a builder for the named transformation.
    pub fn new(
        algorithm: impl Into<String>,
        mode: impl Into<String>,
        padding: impl Into<String>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            mode: mode.into(),
            padding: padding.into(),
            key_pool: None,
            iv_pool: None,
            checksum: None,
            parameter_supplier: None,
            cipher: None,
        }
    }

    /// `SM4/ECB/PKCS7Padding`
    pub fn sm4_ecb() -> Self {
        Self::new("SM4", "ECB", "PKCS7Padding")
    }

    /// `SM4/CBC/PKCS7Padding`
    pub fn sm4_cbc() -> Self {
        Self::new("SM4", "CBC", "PKCS7Padding")
    }

    /// `SM4/CFB/NoPadding`
    pub fn sm4_cfb() -> Self {
        Self::new("SM4", "CFB", "NoPadding")
    }

    /// `SM4/OFB/NoPadding`
    pub fn sm4_ofb() -> Self {
        Self::new("SM4", "OFB", "NoPadding")
    }

    /// `AES/ECB/PKCS7Padding`
    pub fn aes_ecb() -> Self {
        Self::new("AES", "ECB", "PKCS7Padding")
    }

    /// `AES/CBC/PKCS7Padding`
    pub fn aes_cbc() -> Self {
        Self::new("AES", "CBC", "PKCS7Padding")
    }

    /// Pool of candidate keys.
    pub fn key_pool(mut self, pool: impl KeyPool + 'static) -> Self {
        self.key_pool = Some(Arc::new(pool));
        self
    }

    /// Pool of candidate IVs.
    pub fn iv_pool(mut self, pool: impl KeyPool + 'static) -> Self {
        self.iv_pool = Some(Arc::new(pool));
        self
    }

    /// Checksum recomputed over each candidate plaintext.
    pub fn checksum_function(mut self, checksum: ChecksumFn) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Source of the synchronization parameter.
    pub fn parameter_supplier(mut self, supplier: impl ParameterSupplier + 'static) -> Self {
        self.parameter_supplier = Some(Arc::new(supplier));
        self
    }

    /// Cipher primitive used for every trial.
    pub fn cipher(mut self, cipher: impl CipherPrimitive + 'static) -> Self {
        self.cipher = Some(Arc::new(cipher));
        self
    }

    /// Validate and build the decrypting side.
    ///
    /// # Errors
    ///
    /// - `EmptyField`: algorithm, mode or padding name is empty
    /// - `Transformation`: the names do not form a supported transformation
    /// - `MissingField`: no key pool or checksum function
    pub fn build(self) -> Result<TrialDecryptor, ConfigError> {
        self.components().map(TrialDecryptor::new)
    }

    /// Validate and build the encrypting side from the same settings.
    pub fn build_encryptor(self) -> Result<DynamicEncryptor, ConfigError> {
        self.components().map(DynamicEncryptor::new)
    }

    fn components(self) -> Result<Components, ConfigError> {
        for (field, value) in
            [("algorithm", &self.algorithm), ("mode", &self.mode), ("padding", &self.padding)]
        {
            if value.is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }

        let transformation = Transformation::from_names(&self.algorithm, &self.mode, &self.padding)?;
        let key_pool = self.key_pool.ok_or(ConfigError::MissingField { field: "key_pool" })?;
        let checksum =
            self.checksum.ok_or(ConfigError::MissingField { field: "checksum_function" })?;

        let iv_pool: Arc<dyn KeyPool> = match self.iv_pool {
            Some(pool) => pool,
            None => Arc::new(EmptyPool::new()),
        };
        let parameter_supplier: Arc<dyn ParameterSupplier> = match self.parameter_supplier {
            Some(supplier) => supplier,
            None => Arc::new(SystemClock::new()),
        };
        let cipher: Arc<dyn CipherPrimitive> = match self.cipher {
            Some(cipher) => cipher,
            None => Arc::new(SoftwareCipher::new()),
        };

        Ok(Components { transformation, key_pool, iv_pool, checksum, parameter_supplier, cipher })
    }
}
