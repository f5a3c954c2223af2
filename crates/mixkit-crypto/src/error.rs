//! Error types for cryptographic operations

use thiserror::Error;

/// Errors that can occur during cryptographic operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Blowfish key outside the supported 4..=56 byte range
    #[error("Invalid key size: expected {min}..={max} bytes, got {actual}")]
    InvalidKeySize {
        /// Smallest accepted key size in bytes
        min: usize,
        /// Largest accepted key size in bytes
        max: usize,
        /// Actual key size in bytes
        actual: usize,
    },

    /// Buffer handed to the block cipher is not a whole number of blocks
    #[error("Invalid block length: {actual} bytes is not a multiple of {block_size}")]
    InvalidBlockLength {
        /// Cipher block size in bytes
        block_size: usize,
        /// Actual buffer length in bytes
        actual: usize,
    },

    /// Key source could not be turned into a key
    #[error("Invalid key source: {0}")]
    InvalidKeySource(String),
}
