//! Count-prefixed MIX index table
//!
//! ```text
//! u16   count
//! u32   body size (not validated)
//! count × { u32 id, u32 offset, u32 size }
//! ```
//!
//! The same table layout is read straight from unencrypted archives and from
//! the decrypted buffer of encrypted ones.

use super::entry::MixEntry;
use super::error::{MixError, MixResult};
use super::header::TABLE_PREFIX_SIZE;
use binrw::BinRead;
use std::collections::HashMap;
use std::collections::hash_map;
use std::io::Cursor;
use tracing::{debug, trace, warn};

/// Diagnostic counts gathered while reading a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    /// Entry count stored in the table prefix
    pub declared: u16,
    /// Entries actually read before the table ended
    pub parsed: usize,
    /// Entries whose identifier replaced an earlier row
    pub duplicates: usize,
}

impl TableStats {
    /// Whether the table ended before `declared` entries were read
    pub fn is_truncated(&self) -> bool {
        self.parsed < usize::from(self.declared)
    }
}

/// Identifier → entry map of one archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixIndex {
    entries: HashMap<u32, MixEntry>,
    stats: TableStats,
}

impl MixIndex {
    /// Read a table from `reader`, leaving it just past the last entry read
    ///
    /// Fewer than 12 bytes left for a declared entry ends the table early
    /// without error; only a missing count/size prefix fails. When several
    /// rows share an identifier the last one wins.
    pub fn parse<T: AsRef<[u8]>>(reader: &mut Cursor<T>) -> MixResult<Self> {
        if remaining(reader) < TABLE_PREFIX_SIZE as u64 {
            return Err(MixError::malformed(format!(
                "index prefix needs {TABLE_PREFIX_SIZE} bytes at offset {}, {} available",
                reader.position(),
                remaining(reader)
            )));
        }

        let declared = u16::read_le(reader)?;
        let body_size = u32::read_le(reader)?;
        trace!("index declares {} entries, body size {}", declared, body_size);

        let mut index = Self {
            entries: HashMap::with_capacity(usize::from(declared)),
            stats: TableStats {
                declared,
                ..TableStats::default()
            },
        };

        for row in 0..declared {
            if remaining(reader) < MixEntry::SIZE as u64 {
                warn!(
                    "index truncated at entry {} of {}: {} bytes left at offset {}",
                    row,
                    declared,
                    remaining(reader),
                    reader.position()
                );
                break;
            }

            let entry = MixEntry::read(reader)?;
            if index.insert(entry) {
                debug!("entry {} replaces earlier id {:08X}", row, entry.id);
            }
        }

        Ok(index)
    }

    /// Insert an entry, returning true if it replaced one with the same id
    fn insert(&mut self, entry: MixEntry) -> bool {
        self.stats.parsed += 1;
        let replaced = self.entries.insert(entry.id, entry).is_some();
        if replaced {
            self.stats.duplicates += 1;
        }
        replaced
    }

    /// Look up an entry by identifier
    pub fn get(&self, id: u32) -> Option<&MixEntry> {
        self.entries.get(&id)
    }

    /// Whether an identifier is present
    pub fn contains_id(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in no particular order
    pub fn iter(&self) -> hash_map::Values<'_, u32, MixEntry> {
        self.entries.values()
    }

    /// Counts gathered while parsing
    pub fn stats(&self) -> TableStats {
        self.stats
    }
}

fn remaining<T: AsRef<[u8]>>(reader: &Cursor<T>) -> u64 {
    (reader.get_ref().as_ref().len() as u64).saturating_sub(reader.position())
}
