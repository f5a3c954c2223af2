//! Cryptographic operations for Westwood MIX archives
//!
//! This crate provides the primitives the MIX decoder consumes to read
//! encrypted indices and to look entries up by name.
//!
//! # Components
//!
//! - **Key recovery**: RSA-obfuscated 80-byte key source to 56-byte Blowfish key
//! - **Encryption**: Blowfish with little-endian block halves
//! - **Hashing**: CRC-32 and rotate-and-add filename identifiers
//!
//! # Examples
//!
//! ## Filename Identifiers
//!
//! ```
//! use mixkit_crypto::IdHash;
//!
//! let id = IdHash::Crc32.hash("rules.ini");
//! assert_eq!(id, 0xF025_A96C);
//! ```
//!
//! ## Header Decryption
//!
//! ```
//! use mixkit_crypto::{KeyDerivation, MixCipher, WestwoodKeyDerivation};
//!
//! let key_source = [0x11u8; 80];
//! let key = WestwoodKeyDerivation::new().derive_key(&key_source)?;
//! let cipher = MixCipher::new(&key)?;
//! let plain = cipher.decrypt(&[0u8; 8])?;
//! assert_eq!(plain.len(), 8);
//! # Ok::<(), mixkit_crypto::CryptoError>(())
//! ```
//!
//! ## Custom Key Derivation
//!
//! ```
//! use mixkit_crypto::{CipherKey, CryptoError, KeyDerivation};
//!
//! struct FixedKey(Vec<u8>);
//!
//! impl KeyDerivation for FixedKey {
//!     fn derive_key(&self, _source: &[u8; 80]) -> Result<CipherKey, CryptoError> {
//!         CipherKey::new(self.0.clone())
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod blowfish;
pub mod error;
pub mod id;
pub mod keys;

pub use error::CryptoError;

// Re-export commonly used types
pub use self::blowfish::{BLOCK_SIZE, MixCipher};
pub use id::{IdHash, crc32_id, rotate_id};
pub use keys::{CipherKey, KEY_SIZE, KEY_SOURCE_SIZE, KeyDerivation, WestwoodKeyDerivation};
