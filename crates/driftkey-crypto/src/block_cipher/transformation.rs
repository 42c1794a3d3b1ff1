//! Cipher transformation names
//!
//! A transformation is the `ALGORITHM/MODE/PADDING` triple that fully selects
//! a block cipher configuration, e.g. `SM4/CBC/PKCS7Padding`. Names are
//! matched case-insensitively and rendered in their canonical spelling.

use std::{fmt, str::FromStr};

use super::error::CipherError;

/// Block size shared by every supported algorithm (bytes).
pub const BLOCK_SIZE: usize = 16;

/// Block cipher algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// AES with 128, 192 or 256-bit keys (selected by key length)
    Aes,
    /// SM4 with a 128-bit key
    Sm4,
}

impl Algorithm {
    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes => "AES",
            Self::Sm4 => "SM4",
        }
    }

    /// Accepted key lengths in bytes.
    pub fn key_sizes(self) -> &'static [usize] {
        match self {
            Self::Aes => &[16, 24, 32],
            Self::Sm4 => &[16],
        }
    }
}

impl FromStr for Algorithm {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AES" => Ok(Self::Aes),
            "SM4" => Ok(Self::Sm4),
            _ => Err(CipherError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Block cipher mode of operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic codebook (no IV)
    Ecb,
    /// Cipher block chaining
    Cbc,
    /// Cipher feedback (full-block segments)
    Cfb,
    /// Output feedback
    Ofb,
}

impl Mode {
    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ecb => "ECB",
            Self::Cbc => "CBC",
            Self::Cfb => "CFB",
            Self::Ofb => "OFB",
        }
    }

    /// Whether the mode takes an IV.
    pub fn requires_iv(self) -> bool {
        !matches!(self, Self::Ecb)
    }

    /// Whether the mode turns the block cipher into a stream cipher.
    ///
    /// Stream modes handle arbitrary input lengths and take no padding.
    pub fn is_stream(self) -> bool {
        matches!(self, Self::Cfb | Self::Ofb)
    }
}

impl FromStr for Mode {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ECB" => Ok(Self::Ecb),
            "CBC" => Ok(Self::Cbc),
            "CFB" => Ok(Self::Cfb),
            "OFB" => Ok(Self::Ofb),
            _ => Err(CipherError::UnsupportedMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Block padding scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
    /// PKCS#7 padding (`PKCS5Padding` is accepted as an alias)
    Pkcs7,
    /// No padding; block modes require block-aligned input
    NoPadding,
}

impl Padding {
    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pkcs7 => "PKCS7Padding",
            Self::NoPadding => "NoPadding",
        }
    }
}

impl FromStr for Padding {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PKCS7PADDING" | "PKCS5PADDING" => Ok(Self::Pkcs7),
            "NOPADDING" => Ok(Self::NoPadding),
            _ => Err(CipherError::UnsupportedPadding(s.to_string())),
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Complete cipher selection: algorithm, mode and padding.
///
/// # Invariants
///
/// - Stream modes (CFB, OFB) always carry [`Padding::NoPadding`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transformation {
    algorithm: Algorithm,
    mode: Mode,
    padding: Padding,
}

impl Transformation {
    /// Combine an algorithm, mode and padding.
    ///
    /// # Errors
    ///
    /// - `UnsupportedCombination`: a stream mode with a padding scheme
    pub fn new(algorithm: Algorithm, mode: Mode, padding: Padding) -> Result<Self, CipherError> {
        if mode.is_stream() && padding != Padding::NoPadding {
            return Err(CipherError::UnsupportedCombination { mode, padding });
        }
        Ok(Self { algorithm, mode, padding })
    }

    /// Parse the three component names.
    pub fn from_names(algorithm: &str, mode: &str, padding: &str) -> Result<Self, CipherError> {
        Self::new(algorithm.parse()?, mode.parse()?, padding.parse()?)
    }

    /// Algorithm component.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Mode component.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Padding component.
    pub fn padding(&self) -> Padding {
        self.padding
    }
}

impl FromStr for Transformation {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(algorithm), Some(mode), Some(padding), None) => {
                Self::from_names(algorithm, mode, padding)
            },
            _ => Err(CipherError::MalformedTransformation(s.to_string())),
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.algorithm, self.mode, self.padding)
    }
}
