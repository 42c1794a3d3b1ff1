//! Per-trial records and the aggregate decrypt outcome
//!
//! # Invariants
//!
//! - `tried` is never empty on a returned result
//! - On success the match is the LAST entry of `tried`: the search stops at
//!   the first match
//! - On exhaustion no entry is matched

use driftkey_crypto::CipherError;

use crate::error::DecryptError;

/// Outcome of one (key, IV) trial.
///
/// Records tags only. Key bytes never appear in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptInfo {
    matched: bool,
    key_tag: String,
    iv_tag: Option<String>,
    checksum: Vec<u8>,
    data: Option<Vec<u8>>,
    failure: Option<CipherError>,
}

impl DecryptInfo {
    /// The primitive decrypted; `checksum` was computed over `data`.
    pub(crate) fn decrypted(
        key_tag: &str,
        iv_tag: Option<&str>,
        expected: &[u8],
        checksum: Vec<u8>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            matched: checksum == expected,
            key_tag: key_tag.to_string(),
            iv_tag: iv_tag.map(str::to_string),
            checksum,
            data: Some(data),
            failure: None,
        }
    }

    /// The primitive rejected this key/IV.
    pub(crate) fn failed(key_tag: &str, iv_tag: Option<&str>, failure: CipherError) -> Self {
        Self {
            matched: false,
            key_tag: key_tag.to_string(),
            iv_tag: iv_tag.map(str::to_string),
            checksum: Vec::new(),
            data: None,
            failure: Some(failure),
        }
    }

    /// Whether the recomputed checksum equals the blob's checksum.
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Tag of the key tried.
    pub fn key_tag(&self) -> &str {
        &self.key_tag
    }

    /// Tag of the IV tried, `None` when the trial ran without an IV.
    pub fn iv_tag(&self) -> Option<&str> {
        self.iv_tag.as_deref()
    }

    /// Checksum recomputed over the decrypted data.
    ///
    /// Empty when the primitive failed.
    pub fn checksum(&self) -> &[u8] {
        &self.checksum
    }

    /// Decrypted bytes, present whenever the primitive succeeded (matched or
    /// not).
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Why the primitive failed, if it did.
    pub fn failure(&self) -> Option<&CipherError> {
        self.failure.as_ref()
    }

    /// Take the decrypted bytes.
    pub fn into_data(self) -> Option<Vec<u8>> {
        self.data
    }
}

/// Outcome of a full trial search.
///
/// No match is a normal outcome under key rotation, so it is reported here
/// rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicDecryptResult {
    tried: Vec<DecryptInfo>,
    success: bool,
}

impl DynamicDecryptResult {
    /// The last entry of `tried` matched.
    pub(crate) fn matched(tried: Vec<DecryptInfo>) -> Self {
        debug_assert!(tried.last().is_some_and(DecryptInfo::matched));
        Self { tried, success: true }
    }

    /// Every candidate was tried without a match.
    pub(crate) fn exhausted(tried: Vec<DecryptInfo>) -> Self {
        debug_assert!(!tried.iter().any(DecryptInfo::matched));
        Self { tried, success: false }
    }

    /// True iff a candidate matched.
    pub fn success(&self) -> bool {
        self.success
    }

    /// The matching trial, if any.
    pub fn matched_info(&self) -> Option<&DecryptInfo> {
        if self.success { self.tried.last() } else { None }
    }

    /// The matching trial.
    ///
    /// # Errors
    ///
    /// - `NotMatched`: the search was exhausted. Callers should check
    ///   [`Self::success`] first; reaching this is a programming error.
    pub fn required_matched(&self) -> Result<&DecryptInfo, DecryptError> {
        self.matched_info().ok_or(DecryptError::NotMatched { tried: self.tried.len() })
    }

    /// Every trial in the order attempted.
    pub fn tried(&self) -> &[DecryptInfo] {
        &self.tried
    }

    /// Take the matching trial.
    pub fn into_matched(mut self) -> Option<DecryptInfo> {
        if self.success { self.tried.pop() } else { None }
    }

    /// Take the full trial history.
    pub fn into_tried(self) -> Vec<DecryptInfo> {
        self.tried
    }
}
