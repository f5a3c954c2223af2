//! MIX index entry

use binrw::{BinRead, BinWrite};
use std::ops::Range;

/// One row of a MIX index (12 bytes on disk)
///
/// `offset` is relative to the archive's data-section base, not to the start
/// of the file.
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[brw(little)]
pub struct MixEntry {
    /// Filename identifier
    pub id: u32,
    /// Payload offset from the data-section base
    pub offset: u32,
    /// Payload length in bytes
    pub size: u32,
}

impl MixEntry {
    /// On-disk size of one entry
    pub const SIZE: usize = 12;

    /// Create an entry
    pub fn new(id: u32, offset: u32, size: u32) -> Self {
        Self { id, offset, size }
    }

    /// Absolute byte range of the payload for a given data-section base
    pub fn absolute_range(&self, data_base: u64) -> Range<u64> {
        let start = data_base + u64::from(self.offset);
        start..start + u64::from(self.size)
    }
}
