//! MIX header classification and layout arithmetic
//!
//! The first four bytes of a MIX archive are either a flags word (Red Alert and
//! later) or the start of a Tiberian Dawn index, whose `u16` count and `u32`
//! size begin at offset 0. There is no magic number: a word is taken to be
//! flags when nothing outside the checksum and encryption bits is set.

use super::entry::MixEntry;
use std::fmt;

/// Offset of the encrypted index: flags (4) + key source (80)
pub const HEADER_START: u64 = 84;

/// Size of the `u16` count + `u32` body size prefix of every index
pub const TABLE_PREFIX_SIZE: usize = 6;

/// Flags word of a flagged archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MixFlags(u32);

impl MixFlags {
    /// A 20-byte digest follows the archive body
    pub const CHECKSUM: u32 = 0x0001_0000;
    /// Index is Blowfish-encrypted
    pub const ENCRYPTED: u32 = 0x0002_0000;

    /// Wrap a raw flags word
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw flags word
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether the checksum bit is set
    pub fn has_checksum(self) -> bool {
        self.0 & Self::CHECKSUM != 0
    }

    /// Whether the encryption bit is set
    pub fn is_encrypted(self) -> bool {
        self.0 & Self::ENCRYPTED != 0
    }

    /// Whether `word` can only be a flags word
    ///
    /// Zero passes this test too, so an unflagged archive whose index begins
    /// with count 0 and a body size below 4 is read as flagged.
    pub fn is_flags_word(word: u32) -> bool {
        word & !(Self::CHECKSUM | Self::ENCRYPTED) == 0
    }
}

/// Header layout of an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixFormat {
    /// No flags word; index starts at offset 0 (Tiberian Dawn)
    Legacy,
    /// Flags word with neither bit set; index starts at offset 4
    Plain,
    /// Checksum bit only; index starts at offset 4
    Checksummed,
    /// Encryption bit set, checksum optional
    Encrypted,
}

impl MixFormat {
    /// Classify the first little-endian word of an archive
    pub fn sniff(first_word: u32) -> Self {
        if !MixFlags::is_flags_word(first_word) {
            return Self::Legacy;
        }
        let flags = MixFlags::from_bits(first_word);
        if flags.is_encrypted() {
            Self::Encrypted
        } else if flags.has_checksum() {
            Self::Checksummed
        } else {
            Self::Plain
        }
    }

    /// Where the index table starts
    ///
    /// For [`MixFormat::Encrypted`] this is where the ciphertext starts, after
    /// the key source.
    pub fn table_start(self) -> u64 {
        match self {
            Self::Legacy => 0,
            Self::Plain | Self::Checksummed => 4,
            Self::Encrypted => HEADER_START,
        }
    }
}

impl fmt::Display for MixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Legacy => "legacy",
            Self::Plain => "plain",
            Self::Checksummed => "checksummed",
            Self::Encrypted => "encrypted",
        };
        f.write_str(name)
    }
}

/// Byte length of an index holding `count` entries, prefix included
pub fn table_len(count: u16) -> u64 {
    TABLE_PREFIX_SIZE as u64 + u64::from(count) * MixEntry::SIZE as u64
}

/// Bytes of ciphertext covering a table of `table_len` bytes
///
/// The table is read as 32-bit words, rounded up to an even word count so it
/// covers whole Blowfish blocks.
pub fn encrypted_span(table_len: u64) -> u64 {
    let words = table_len.div_ceil(4);
    (words + words % 2) * 4
}

/// Padding that brings `table_len` up to a multiple of 8
pub fn alignment_pad(table_len: u64) -> u64 {
    table_len.wrapping_neg() & 7
}

/// Data-section base of an encrypted archive with `count` entries
pub fn encrypted_data_base(count: u16) -> u64 {
    let len = table_len(count);
    HEADER_START + len + alignment_pad(len)
}
