//! Blowfish key recovery for encrypted MIX headers
//!
//! Encrypted archives do not store their Blowfish key directly. Instead an
//! 80-byte key source follows the flags word, and the real key is recovered by
//! running the source through the RSA public-key operation with a fixed
//! Westwood public key:
//!
//! - The source is split into 40-byte blocks, each read as a little-endian
//!   integer `m`
//! - Each block yields `m^65537 mod n`, of which the low 39 bytes are kept
//! - The first 56 bytes of the concatenated output are the Blowfish key
//!
//! The [`KeyDerivation`] trait lets callers substitute their own scheme (tests
//! use it to build encrypted archives without the private key).

use crate::error::CryptoError;
use rsa::BigUint;
use std::fmt;

/// Size of the key source blob stored after the flags word
pub const KEY_SOURCE_SIZE: usize = 80;

/// Size of a derived Blowfish key
pub const KEY_SIZE: usize = 56;

/// Smallest key Blowfish accepts
pub const MIN_KEY_SIZE: usize = 4;

/// Public exponent of the Westwood key
const PUBLIC_EXPONENT: u32 = 0x10001;

/// Westwood public modulus, big-endian (319 bits)
const PUBLIC_MODULUS: [u8; 40] = [
    0x51, 0xbc, 0xda, 0x08, 0x6d, 0x39, 0xfc, 0xe4, //
    0x56, 0x51, 0x60, 0xd6, 0x51, 0x71, 0x3f, 0xa2, //
    0xe8, 0xaa, 0x54, 0xfa, 0x66, 0x82, 0xb0, 0x4a, //
    0xab, 0xdd, 0x0e, 0x6a, 0xf8, 0xb0, 0xc1, 0xe6, //
    0xd1, 0xfb, 0x4f, 0x3d, 0xaa, 0x43, 0x7f, 0x15,
];

/// Blowfish key recovered from a key source
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey(Vec<u8>);

impl CipherKey {
    /// Wrap raw key bytes (4..=56 bytes)
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, CryptoError> {
        let bytes = bytes.into();
        if !(MIN_KEY_SIZE..=KEY_SIZE).contains(&bytes.len()) {
            return Err(CryptoError::InvalidKeySize {
                min: MIN_KEY_SIZE,
                max: KEY_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed key
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherKey({} bytes)", self.0.len())
    }
}

impl fmt::Display for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

/// Turns an archive's key source into a Blowfish key
pub trait KeyDerivation {
    /// Derive the cipher key for one archive
    fn derive_key(&self, source: &[u8; KEY_SOURCE_SIZE]) -> Result<CipherKey, CryptoError>;
}

/// Key derivation used by retail Red Alert, Tiberian Sun and Red Alert 2 archives
#[derive(Debug, Clone)]
pub struct WestwoodKeyDerivation {
    modulus: BigUint,
    exponent: BigUint,
    /// Output bytes kept per input block; input blocks are one byte longer
    block_len: usize,
}

impl WestwoodKeyDerivation {
    /// Create a deriver for the built-in Westwood public key
    pub fn new() -> Self {
        Self::with_public_key(&PUBLIC_MODULUS, PUBLIC_EXPONENT)
    }

    /// Create a deriver for another public key
    ///
    /// `modulus` is big-endian. The block length follows the modulus bit
    /// length the same way the retail games compute it.
    pub fn with_public_key(modulus: &[u8], exponent: u32) -> Self {
        let modulus = BigUint::from_bytes_be(modulus);
        let key_bits = modulus.bits().saturating_sub(1);
        Self {
            modulus,
            exponent: BigUint::from(exponent),
            block_len: key_bits.saturating_sub(1) / 8,
        }
    }

    /// Output bytes produced per input block
    pub fn block_len(&self) -> usize {
        self.block_len
    }
}

impl Default for WestwoodKeyDerivation {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDerivation for WestwoodKeyDerivation {
    fn derive_key(&self, source: &[u8; KEY_SOURCE_SIZE]) -> Result<CipherKey, CryptoError> {
        if self.block_len == 0 {
            return Err(CryptoError::InvalidKeySource(
                "public modulus too small".to_string(),
            ));
        }

        let mut key = Vec::with_capacity(KEY_SOURCE_SIZE);
        for block in source.chunks_exact(self.block_len + 1) {
            let message = BigUint::from_bytes_le(block);
            let mut plain = message
                .modpow(&self.exponent, &self.modulus)
                .to_bytes_le();
            plain.resize(plain.len().max(self.block_len), 0);
            key.extend_from_slice(&plain[..self.block_len]);
        }

        if key.len() < KEY_SIZE {
            return Err(CryptoError::InvalidKeySource(format!(
                "derived {} bytes, need {KEY_SIZE}",
                key.len()
            )));
        }
        key.truncate(KEY_SIZE);
        CipherKey::new(key)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn counting_source() -> [u8; KEY_SOURCE_SIZE] {
        let mut source = [0u8; KEY_SOURCE_SIZE];
        for (i, byte) in source.iter_mut().enumerate() {
            *byte = (i + 1) as u8;
        }
        source
    }

    #[test]
    fn test_westwood_block_len() {
        assert_eq!(WestwoodKeyDerivation::new().block_len(), 39);
    }

    #[test]
    fn test_westwood_known_vector() {
        let expected: [u8; KEY_SIZE] = [
            0x7e, 0x90, 0x16, 0x6e, 0x58, 0x54, 0x73, 0xda, //
            0x82, 0xd2, 0x4b, 0x8e, 0xd1, 0x61, 0x9c, 0xe5, //
            0x0e, 0xbb, 0xc3, 0x3a, 0xc4, 0xfc, 0x93, 0x34, //
            0xc7, 0xec, 0x78, 0x02, 0xd7, 0x43, 0xd3, 0x94, //
            0x43, 0x38, 0x99, 0xce, 0x28, 0x51, 0x8a, 0xdf, //
            0x3e, 0xb8, 0x5b, 0xcf, 0x2a, 0x05, 0x1b, 0x65, //
            0xca, 0xe2, 0x7d, 0x7e, 0xec, 0x59, 0x18, 0x92,
        ];

        let key = WestwoodKeyDerivation::new()
            .derive_key(&counting_source())
            .expect("derivation should succeed");
        assert_eq!(key.as_bytes(), &expected[..]);
    }

    #[test]
    fn test_derivation_is_repeatable() {
        let deriver = WestwoodKeyDerivation::new();
        let source = counting_source();
        let first = deriver.derive_key(&source).expect("first derivation");
        let second = deriver.derive_key(&source).expect("second derivation");
        assert_eq!(first, second);
        assert_eq!(first.len(), KEY_SIZE);
    }

    #[test]
    fn test_tiny_modulus_rejected() {
        let deriver = WestwoodKeyDerivation::with_public_key(&[0x03], 3);
        let result = deriver.derive_key(&[0u8; KEY_SOURCE_SIZE]);
        assert!(matches!(result, Err(CryptoError::InvalidKeySource(_))));
    }

    #[test]
    fn test_cipher_key_bounds() {
        assert!(CipherKey::new(vec![0u8; 3]).is_err());
        assert!(CipherKey::new(vec![0u8; 57]).is_err());
        assert!(CipherKey::new(vec![0u8; 4]).is_ok());
        assert!(CipherKey::new(vec![0u8; KEY_SIZE]).is_ok());
    }

    #[test]
    fn test_cipher_key_debug_hides_bytes() {
        let key = CipherKey::new(vec![0xAB; 8]).unwrap();
        assert_eq!(format!("{key:?}"), "CipherKey(8 bytes)");
        assert_eq!(key.to_string(), "abababababababab");
    }
}
