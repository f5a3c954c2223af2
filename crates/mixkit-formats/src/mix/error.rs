//! Error types for MIX archive operations

use mixkit_crypto::CryptoError;
use thiserror::Error;

/// MIX operation result type
pub type MixResult<T> = Result<T, MixError>;

/// Errors raised while opening a MIX archive or reading entries from it
#[derive(Debug, Error)]
pub enum MixError {
    /// Header or index could not be decoded; the archive is unusable
    #[error("Malformed MIX header: {reason}")]
    MalformedHeader {
        /// What was wrong with the header
        reason: String,
    },

    /// No entry with this name's identifier
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Entry points past the end of the archive
    #[error("Entry {name} spans {start}..{end} but the archive is {source_len} bytes")]
    EntryOutOfBounds {
        /// Name the entry was requested by
        name: String,
        /// Absolute start offset
        start: u64,
        /// Absolute end offset (exclusive)
        end: u64,
        /// Length of the underlying source
        source_len: u64,
    },

    /// Key recovery or header decryption failed
    #[error("Header decryption failed: {0}")]
    Crypto(#[from] CryptoError),

    /// Binary read error
    #[error("Binary format error: {0}")]
    BinRead(#[from] binrw::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MixError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            reason: reason.into(),
        }
    }

    /// Failure of a single lookup; the archive itself is still usable
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            Self::EntryNotFound(_) | Self::EntryOutOfBounds { .. }
        )
    }

    /// Failure that made the archive unusable
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::MalformedHeader { .. } | Self::Crypto(_) | Self::BinRead(_)
        )
    }
}
