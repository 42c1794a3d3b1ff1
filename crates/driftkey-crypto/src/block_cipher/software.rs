//! Block cipher primitive backed by the RustCrypto crates
//!
//! All functions are pure: the primitive holds no state and can be shared
//! across threads freely.

use cipher::{
    AsyncStreamCipher, BlockCipher, BlockDecrypt, BlockDecryptMut, BlockEncrypt, BlockEncryptMut,
    InvalidLength, KeyInit, KeyIvInit, StreamCipher,
    block_padding::{NoPadding, Pkcs7},
    consts::U16,
};

use super::{
    error::CipherError,
    transformation::{Algorithm, BLOCK_SIZE, Mode, Padding, Transformation},
};

/// Encrypt/decrypt given a transformation, key and optional IV.
///
/// The trial decryptor treats this as an injected collaborator, so tests and
/// hardware-backed deployments can substitute their own implementation.
pub trait CipherPrimitive: Send + Sync {
    /// Encrypt `data`.
    fn encrypt(
        &self,
        transformation: &Transformation,
        key: &[u8],
        iv: Option<&[u8]>,
        data: &[u8],
    ) -> Result<Vec<u8>, CipherError>;

    /// Decrypt `data`.
    ///
    /// # Errors
    ///
    /// - Configuration errors (see [`CipherError::is_configuration`]) when the
    ///   transformation/IV combination can never work
    /// - `InvalidKeyLength`, `BadPadding`, `UnalignedInput` for failures tied
    ///   to this particular key, IV or ciphertext
    fn decrypt(
        &self,
        transformation: &Transformation,
        key: &[u8],
        iv: Option<&[u8]>,
        data: &[u8],
    ) -> Result<Vec<u8>, CipherError>;
}

/// Software implementation of [`CipherPrimitive`].
///
/// AES key size (128/192/256) is selected from the key length.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareCipher;

impl SoftwareCipher {
    /// Create the software primitive.
    pub fn new() -> Self {
        Self
    }
}

impl CipherPrimitive for SoftwareCipher {
    fn encrypt(
        &self,
        transformation: &Transformation,
        key: &[u8],
        iv: Option<&[u8]>,
        data: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        dispatch(Direction::Encrypt, transformation, key, iv, data)
    }

    fn decrypt(
        &self,
        transformation: &Transformation,
        key: &[u8],
        iv: Option<&[u8]>,
        data: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        dispatch(Direction::Decrypt, transformation, key, iv, data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn dispatch(
    direction: Direction,
    transformation: &Transformation,
    key: &[u8],
    iv: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let iv = check_iv(transformation.mode(), iv)?;
    check_alignment(direction, transformation, data)?;

    match transformation.algorithm() {
        Algorithm::Sm4 => apply::<sm4::Sm4>(direction, transformation, key, iv, data),
        Algorithm::Aes => match key.len() {
            16 => apply::<aes::Aes128>(direction, transformation, key, iv, data),
            24 => apply::<aes::Aes192>(direction, transformation, key, iv, data),
            32 => apply::<aes::Aes256>(direction, transformation, key, iv, data),
            actual => Err(CipherError::InvalidKeyLength { algorithm: Algorithm::Aes.name(), actual }),
        },
    }
}

fn check_iv(mode: Mode, iv: Option<&[u8]>) -> Result<&[u8], CipherError> {
    match (mode.requires_iv(), iv) {
        (true, None) => Err(CipherError::MissingIv { mode }),
        (false, Some(_)) => Err(CipherError::UnexpectedIv { mode }),
        (true, Some(iv)) if iv.len() != BLOCK_SIZE => {
            Err(CipherError::InvalidIvLength { expected: BLOCK_SIZE, actual: iv.len() })
        },
        (_, iv) => Ok(iv.unwrap_or_default()),
    }
}

/// Block modes need whole blocks, except for padded encryption.
fn check_alignment(
    direction: Direction,
    transformation: &Transformation,
    data: &[u8],
) -> Result<(), CipherError> {
    if transformation.mode().is_stream() {
        return Ok(());
    }
    let padded_encrypt =
        direction == Direction::Encrypt && transformation.padding() == Padding::Pkcs7;
    if !padded_encrypt && data.len() % BLOCK_SIZE != 0 {
        return Err(CipherError::UnalignedInput { len: data.len(), block_size: BLOCK_SIZE });
    }
    Ok(())
}

fn apply<C>(
    direction: Direction,
    transformation: &Transformation,
    key: &[u8],
    iv: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, CipherError>
where
    C: BlockCipher<BlockSize = U16> + BlockEncrypt + BlockDecrypt + KeyInit,
{
    // IV length is already checked, so any length error here is the key
    let key_error = |_: InvalidLength| CipherError::InvalidKeyLength {
        algorithm: transformation.algorithm().name(),
        actual: key.len(),
    };
    let padding = transformation.padding();

    match (transformation.mode(), direction) {
        (Mode::Ecb, Direction::Encrypt) => {
            let encryptor = ecb::Encryptor::<C>::new_from_slice(key).map_err(key_error)?;
            Ok(encrypt_padded(encryptor, padding, data))
        },
        (Mode::Ecb, Direction::Decrypt) => {
            let decryptor = ecb::Decryptor::<C>::new_from_slice(key).map_err(key_error)?;
            decrypt_padded(decryptor, padding, data)
        },
        (Mode::Cbc, Direction::Encrypt) => {
            let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv).map_err(key_error)?;
            Ok(encrypt_padded(encryptor, padding, data))
        },
        (Mode::Cbc, Direction::Decrypt) => {
            let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv).map_err(key_error)?;
            decrypt_padded(decryptor, padding, data)
        },
        (Mode::Cfb, Direction::Encrypt) => {
            let encryptor = cfb_mode::Encryptor::<C>::new_from_slices(key, iv).map_err(key_error)?;
            let mut buf = data.to_vec();
            encryptor.encrypt(&mut buf);
            Ok(buf)
        },
        (Mode::Cfb, Direction::Decrypt) => {
            let decryptor = cfb_mode::Decryptor::<C>::new_from_slices(key, iv).map_err(key_error)?;
            let mut buf = data.to_vec();
            decryptor.decrypt(&mut buf);
            Ok(buf)
        },
        // OFB is symmetric: the keystream is XORed in both directions
        (Mode::Ofb, _) => {
            let mut keystream = ofb::Ofb::<C>::new_from_slices(key, iv).map_err(key_error)?;
            let mut buf = data.to_vec();
            keystream.apply_keystream(&mut buf);
            Ok(buf)
        },
    }
}

fn encrypt_padded<E: BlockEncryptMut>(encryptor: E, padding: Padding, data: &[u8]) -> Vec<u8> {
    match padding {
        Padding::Pkcs7 => encryptor.encrypt_padded_vec_mut::<Pkcs7>(data),
        Padding::NoPadding => encryptor.encrypt_padded_vec_mut::<NoPadding>(data),
    }
}

fn decrypt_padded<D: BlockDecryptMut>(
    decryptor: D,
    padding: Padding,
    data: &[u8],
) -> Result<Vec<u8>, CipherError> {
    match padding {
        Padding::Pkcs7 => decryptor.decrypt_padded_vec_mut::<Pkcs7>(data),
        Padding::NoPadding => decryptor.decrypt_padded_vec_mut::<NoPadding>(data),
    }
    .map_err(|_| CipherError::BadPadding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_16: [u8; 16] = [
        0x0c, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
        0x10,
    ];

    const IV: [u8; 16] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
        0x10,
    ];

    fn t(text: &str) -> Transformation {
        text.parse().unwrap()
    }

    #[test]
    fn sm4_standard_vector() {
        // GB/T 32907-2016 appendix A.1
        let key = hex::decode("0123456789abcdeffedcba9876543210").unwrap();
        let plain = key.clone();

        let cipher = SoftwareCipher::new();
        let encrypted = cipher.encrypt(&t("SM4/ECB/NoPadding"), &key, None, &plain).unwrap();

        assert_eq!(hex::encode(&encrypted), "681edf34d206965e86b3e94f536e4246");
    }

    #[test]
    fn aes128_standard_vector() {
        // FIPS-197 appendix C.1
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let plain = hex::decode("00112233445566778899aabbccddeeff").unwrap();

        let cipher = SoftwareCipher::new();
        let encrypted = cipher.encrypt(&t("AES/ECB/NoPadding"), &key, None, &plain).unwrap();

        assert_eq!(hex::encode(&encrypted), "69c4e0d86a7b0430d8cdb78070b4c55a");
    }

    #[test]
    fn every_mode_recovers_plaintext() {
        let cipher = SoftwareCipher::new();
        let plain = b"hello, drifting keys";

        for (text, iv) in [
            ("SM4/ECB/PKCS7Padding", None),
            ("SM4/CBC/PKCS7Padding", Some(&IV[..])),
            ("SM4/CFB/NoPadding", Some(&IV[..])),
            ("SM4/OFB/NoPadding", Some(&IV[..])),
            ("AES/CBC/PKCS7Padding", Some(&IV[..])),
            ("AES/OFB/NoPadding", Some(&IV[..])),
        ] {
            let transformation = t(text);
            let encrypted = cipher.encrypt(&transformation, &KEY_16, iv, plain).unwrap();
            assert_ne!(encrypted.as_slice(), plain.as_slice(), "{text} must not be identity");

            let decrypted = cipher.decrypt(&transformation, &KEY_16, iv, &encrypted).unwrap();
            assert_eq!(decrypted, plain, "{text} roundtrip");
        }
    }

    #[test]
    fn pkcs7_pads_to_block_boundary() {
        let cipher = SoftwareCipher::new();

        let encrypted =
            cipher.encrypt(&t("SM4/CBC/PKCS7Padding"), &KEY_16, Some(&IV[..]), b"hello").unwrap();
        assert_eq!(encrypted.len(), BLOCK_SIZE);

        // A full block of input gets a full block of padding
        let encrypted =
            cipher.encrypt(&t("SM4/CBC/PKCS7Padding"), &KEY_16, Some(&IV[..]), &[0u8; 16]).unwrap();
        assert_eq!(encrypted.len(), 2 * BLOCK_SIZE);
    }

    #[test]
    fn stream_modes_preserve_length() {
        let cipher = SoftwareCipher::new();
        let encrypted =
            cipher.encrypt(&t("SM4/CFB/NoPadding"), &KEY_16, Some(&IV[..]), b"hello").unwrap();
        assert_eq!(encrypted.len(), 5);
    }

    #[test]
    fn aes_key_size_selects_variant() {
        let cipher = SoftwareCipher::new();
        let transformation = t("AES/CBC/PKCS7Padding");

        for len in [16, 24, 32] {
            let key = vec![0x5Au8; len];
            let encrypted = cipher.encrypt(&transformation, &key, Some(&IV[..]), b"data").unwrap();
            let decrypted = cipher.decrypt(&transformation, &key, Some(&IV[..]), &encrypted).unwrap();
            assert_eq!(decrypted, b"data");
        }

        let result = cipher.encrypt(&transformation, &[0u8; 20], Some(&IV[..]), b"data");
        assert_eq!(result, Err(CipherError::InvalidKeyLength { algorithm: "AES", actual: 20 }));
    }

    #[test]
    fn sm4_rejects_short_key() {
        let cipher = SoftwareCipher::new();
        let result = cipher.decrypt(&t("SM4/CBC/PKCS7Padding"), &[1, 2, 3], Some(&IV[..]), &[0; 16]);
        assert_eq!(result, Err(CipherError::InvalidKeyLength { algorithm: "SM4", actual: 3 }));
    }

    #[test]
    fn iv_rules_follow_mode() {
        let cipher = SoftwareCipher::new();

        let result = cipher.decrypt(&t("SM4/CBC/PKCS7Padding"), &KEY_16, None, &[0; 16]);
        assert_eq!(result, Err(CipherError::MissingIv { mode: Mode::Cbc }));

        let result = cipher.decrypt(&t("SM4/ECB/PKCS7Padding"), &KEY_16, Some(&IV[..]), &[0; 16]);
        assert_eq!(result, Err(CipherError::UnexpectedIv { mode: Mode::Ecb }));

        let result = cipher.decrypt(&t("SM4/OFB/NoPadding"), &KEY_16, Some(&IV[..8]), &[0; 16]);
        assert_eq!(result, Err(CipherError::InvalidIvLength { expected: 16, actual: 8 }));
    }

    #[test]
    fn block_modes_reject_unaligned_input() {
        let cipher = SoftwareCipher::new();

        let result = cipher.encrypt(&t("SM4/ECB/NoPadding"), &KEY_16, None, b"hello");
        assert_eq!(result, Err(CipherError::UnalignedInput { len: 5, block_size: 16 }));

        let result = cipher.decrypt(&t("SM4/CBC/PKCS7Padding"), &KEY_16, Some(&IV[..]), &[0; 17]);
        assert_eq!(result, Err(CipherError::UnalignedInput { len: 17, block_size: 16 }));
    }

    #[test]
    fn corrupted_padding_is_reported() {
        let cipher = SoftwareCipher::new();
        let transformation = t("SM4/ECB/PKCS7Padding");

        // Encrypt a block whose last byte is not valid PKCS#7 padding
        let mut block = [0u8; 16];
        block[15] = 0x20;
        let encrypted =
            cipher.encrypt(&t("SM4/ECB/NoPadding"), &KEY_16, None, &block).unwrap();

        let result = cipher.decrypt(&transformation, &KEY_16, None, &encrypted);
        assert_eq!(result, Err(CipherError::BadPadding));
    }
}
