//! Blowfish block cipher for MIX header encryption
//!
//! MIX archives encrypt their index with plain ECB Blowfish, but the two
//! 32-bit halves of every 8-byte block are stored little-endian. This wraps
//! the RustCrypto `blowfish` implementation with that byte order.

use crate::error::CryptoError;
use crate::keys::{CipherKey, KEY_SIZE, MIN_KEY_SIZE};
use blowfish::BlowfishLE;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

/// Blowfish block size in bytes
pub const BLOCK_SIZE: usize = 8;

/// Blowfish cipher keyed for one archive
#[derive(Clone)]
pub struct MixCipher {
    inner: BlowfishLE,
}

impl MixCipher {
    /// Key the cipher
    pub fn new(key: &CipherKey) -> Result<Self, CryptoError> {
        let inner =
            BlowfishLE::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::InvalidKeySize {
                min: MIN_KEY_SIZE,
                max: KEY_SIZE,
                actual: key.len(),
            })?;
        Ok(Self { inner })
    }

    /// Decrypt whole blocks in place
    pub fn decrypt_in_place(&self, data: &mut [u8]) -> Result<(), CryptoError> {
        check_block_length(data.len())?;
        for block in data.chunks_exact_mut(BLOCK_SIZE) {
            self.inner
                .decrypt_block(GenericArray::from_mut_slice(block));
        }
        Ok(())
    }

    /// Encrypt whole blocks in place
    pub fn encrypt_in_place(&self, data: &mut [u8]) -> Result<(), CryptoError> {
        check_block_length(data.len())?;
        for block in data.chunks_exact_mut(BLOCK_SIZE) {
            self.inner
                .encrypt_block(GenericArray::from_mut_slice(block));
        }
        Ok(())
    }

    /// Decrypt a copy of `data`
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut output = data.to_vec();
        self.decrypt_in_place(&mut output)?;
        Ok(output)
    }

    /// Encrypt a copy of `data`
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut output = data.to_vec();
        self.encrypt_in_place(&mut output)?;
        Ok(output)
    }
}

fn check_block_length(len: usize) -> Result<(), CryptoError> {
    if len % BLOCK_SIZE == 0 {
        Ok(())
    } else {
        Err(CryptoError::InvalidBlockLength {
            block_size: BLOCK_SIZE,
            actual: len,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_cipher() -> MixCipher {
        let key = CipherKey::new(b"westwood-test-key".to_vec()).expect("valid key");
        MixCipher::new(&key).expect("cipher creation should succeed")
    }

    #[test]
    fn test_blowfish_round_trip() {
        let cipher = test_cipher();
        let plaintext = b"16 byte payload!";

        let ciphertext = cipher.encrypt(plaintext).expect("encrypt");
        assert_ne!(&ciphertext[..], plaintext);

        let decrypted = cipher.decrypt(&ciphertext).expect("decrypt");
        assert_eq!(&decrypted[..], plaintext);
    }

    #[test]
    fn test_blowfish_ecb_blocks_independent() {
        let cipher = test_cipher();
        let ciphertext = cipher.encrypt(&[0x5Au8; 16]).expect("encrypt");
        assert_eq!(ciphertext[..8], ciphertext[8..]);
    }

    #[test]
    fn test_blowfish_little_endian_halves() {
        // Same key, same bytes: standard big-endian Blowfish must disagree
        let key = b"westwood-test-key";
        let plain = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let little = test_cipher().encrypt(&plain).unwrap();

        let big: ::blowfish::Blowfish = KeyInit::new_from_slice(key).unwrap();
        let mut block = GenericArray::clone_from_slice(&plain);
        big.encrypt_block(&mut block);
        assert_ne!(little[..], block[..]);

        // Swapping bytes within each half bridges the two orders
        let mut swapped = plain;
        swapped[..4].reverse();
        swapped[4..].reverse();
        let mut block = GenericArray::clone_from_slice(&swapped);
        big.encrypt_block(&mut block);
        let mut expected = block.to_vec();
        expected[..4].reverse();
        expected[4..].reverse();
        assert_eq!(little, expected);
    }

    #[test]
    fn test_partial_block_rejected() {
        let cipher = test_cipher();
        let result = cipher.decrypt(&[0u8; 12]);
        assert_eq!(
            result,
            Err(CryptoError::InvalidBlockLength {
                block_size: BLOCK_SIZE,
                actual: 12
            })
        );
    }

    proptest! {
        #[test]
        fn blowfish_decrypt_inverts_encrypt(blocks in prop::collection::vec(any::<[u8; 8]>(), 0..16)) {
            let cipher = test_cipher();
            let data: Vec<u8> = blocks.concat();
            let encrypted = cipher.encrypt(&data).unwrap();
            prop_assert_eq!(cipher.decrypt(&encrypted).unwrap(), data);
        }
    }
}
