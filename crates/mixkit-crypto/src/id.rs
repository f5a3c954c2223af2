//! Filename identifiers for MIX archive lookups
//!
//! MIX archives never store filenames. Each entry is keyed by a 32-bit hash of
//! the upper-cased name, and two hash schemes exist:
//!
//! - **CRC-32** (Tiberian Sun, Red Alert 2): names whose length is not a
//!   multiple of four are padded before hashing with one byte holding
//!   `len % 4`, then `3 - len % 4` copies of the first byte of the last
//!   partial chunk
//! - **Rotate** (Tiberian Dawn, Red Alert): names are folded four bytes at a
//!   time as little-endian words, rotating the accumulator left by one
//!   before each addition
//!
//! ```
//! use mixkit_crypto::id::IdHash;
//!
//! assert_eq!(IdHash::Crc32.hash("rules.ini"), IdHash::Crc32.hash("RULES.INI"));
//! assert_eq!(IdHash::Rotate.hash("abcd"), 0x4443_4241);
//! ```

use crc32fast::Hasher;

/// Identifier hash scheme used by an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdHash {
    /// CRC-32 of the padded upper-case name
    #[default]
    Crc32,
    /// Rotate-and-add over little-endian words of the upper-case name
    Rotate,
}

impl IdHash {
    /// Hash a filename with this scheme
    pub fn hash(self, name: &str) -> u32 {
        match self {
            Self::Crc32 => crc32_id(name),
            Self::Rotate => rotate_id(name),
        }
    }
}

/// Tiberian Sun / Red Alert 2 identifier
pub fn crc32_id(name: &str) -> u32 {
    let mut bytes = name.as_bytes().to_ascii_uppercase();
    let len = bytes.len();
    let tail = len % 4;
    if tail != 0 {
        let fill = bytes[len & !3];
        bytes.push(tail as u8);
        bytes.extend(std::iter::repeat_n(fill, 3 - tail));
    }

    let mut hasher = Hasher::new();
    hasher.update(&bytes);
    hasher.finalize()
}

/// Tiberian Dawn / Red Alert identifier
pub fn rotate_id(name: &str) -> u32 {
    let bytes = name.as_bytes().to_ascii_uppercase();
    bytes.chunks(4).fold(0u32, |id, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        id.rotate_left(1).wrapping_add(u32::from_le_bytes(word))
    })
}
