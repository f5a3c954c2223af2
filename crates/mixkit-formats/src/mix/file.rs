//! Opened MIX archive

use super::config::MixConfig;
use super::encrypted::read_encrypted_index;
use super::entry::MixEntry;
use super::error::{MixError, MixResult};
use super::header::{MixFlags, MixFormat};
use super::table::{MixIndex, TableStats};
use super::view::MixView;
use binrw::BinRead;
use bytes::Bytes;
use memmap2::Mmap;
use mixkit_crypto::{IdHash, KeyDerivation, WestwoodKeyDerivation};
use std::fmt;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Length of the digest stored after the body of checksummed archives
pub const CHECKSUM_SIZE: usize = 20;

/// Decoded MIX archive
///
/// The index is built once when the archive is opened and never changes
/// afterwards. Payloads stay in the shared source buffer until a caller copies
/// them out of a [`MixView`].
pub struct MixFile {
    source: Bytes,
    index: MixIndex,
    data_base: u64,
    format: MixFormat,
    flags: MixFlags,
    config: MixConfig,
}

impl MixFile {
    /// Memory-map and decode the archive at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> MixResult<Self> {
        Self::open_with(path, &MixConfig::default(), &WestwoodKeyDerivation::new())
    }

    /// Memory-map and decode the archive at `path` with explicit options
    pub fn open_with<P: AsRef<Path>>(
        path: P,
        config: &MixConfig,
        deriver: &dyn KeyDerivation,
    ) -> MixResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(MixError::malformed(format!("{} is empty", path.display())));
        }

        // The map stays valid while the owning Bytes is alive; the archive is
        // treated as read-only for that time.
        #[allow(unsafe_code)]
        let mmap = unsafe { Mmap::map(&file)? };
        debug!("mapped {} ({} bytes)", path.display(), mmap.len());
        Self::parse_with(Bytes::from_owner(mmap), config, deriver)
    }

    /// Decode an archive held in memory
    pub fn from_bytes(data: impl Into<Bytes>) -> MixResult<Self> {
        Self::parse_with(
            data.into(),
            &MixConfig::default(),
            &WestwoodKeyDerivation::new(),
        )
    }

    /// Decode an archive held in memory with explicit options
    pub fn parse_with(
        source: Bytes,
        config: &MixConfig,
        deriver: &dyn KeyDerivation,
    ) -> MixResult<Self> {
        if source.len() < 4 {
            return Err(MixError::malformed(format!(
                "archive is {} bytes, too short for a header",
                source.len()
            )));
        }

        let mut reader = Cursor::new(&source[..]);
        let first_word = u32::read_le(&mut reader)?;
        let format = MixFormat::sniff(first_word);

        let (flags, index, data_base) = match format {
            MixFormat::Encrypted => {
                let recovered = read_encrypted_index(&mut reader, deriver)?;
                (
                    MixFlags::from_bits(first_word),
                    recovered.index,
                    recovered.data_base,
                )
            }
            MixFormat::Plain | MixFormat::Checksummed | MixFormat::Legacy => {
                // Legacy archives re-read the leading word as count and size
                reader.set_position(format.table_start());
                let index = MixIndex::parse(&mut reader)?;
                let flags = if format == MixFormat::Legacy {
                    MixFlags::default()
                } else {
                    MixFlags::from_bits(first_word)
                };
                (flags, index, reader.position())
            }
        };

        let stats = index.stats();
        debug!(
            "{} archive: {} of {} entries, data section at {}",
            format, stats.parsed, stats.declared, data_base
        );

        let archive = Self {
            source,
            index,
            data_base,
            format,
            flags,
            config: *config,
        };
        if config.check_bounds {
            archive.check_bounds();
        }
        Ok(archive)
    }

    fn check_bounds(&self) {
        let source_len = self.source.len() as u64;
        let outside = self
            .index
            .iter()
            .filter(|entry| entry.absolute_range(self.data_base).end > source_len)
            .count();
        if outside > 0 {
            warn!(
                "{} entries extend past the end of the {}-byte archive",
                outside, source_len
            );
        }
    }

    /// Identifier of `name` under this archive's hash scheme
    pub fn id_of(&self, name: &str) -> u32 {
        self.config.id_hash.hash(name)
    }

    /// Whether an entry with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_id(self.id_of(name))
    }

    /// Index row for `name`
    pub fn entry(&self, name: &str) -> Option<&MixEntry> {
        self.index.get(self.id_of(name))
    }

    /// Index row for a raw identifier
    pub fn entry_by_id(&self, id: u32) -> Option<&MixEntry> {
        self.index.get(id)
    }

    /// Open a view onto the payload of `name`
    pub fn open_entry(&self, name: &str) -> MixResult<MixView> {
        let entry = self
            .entry(name)
            .ok_or_else(|| MixError::EntryNotFound(name.to_string()))?;
        self.view(name.to_string(), entry)
    }

    /// Open a view onto the payload of a raw identifier
    pub fn open_by_id(&self, id: u32) -> MixResult<MixView> {
        let name = format!("{id:08X}");
        let entry = self
            .entry_by_id(id)
            .ok_or_else(|| MixError::EntryNotFound(name.clone()))?;
        self.view(name, entry)
    }

    /// Decode an entry that is itself a MIX archive
    ///
    /// The nested archive shares this archive's buffer and configuration.
    pub fn open_nested(&self, name: &str) -> MixResult<Self> {
        self.open_nested_with(name, &WestwoodKeyDerivation::new())
    }

    /// Decode a nested archive with a specific key derivation
    pub fn open_nested_with(&self, name: &str, deriver: &dyn KeyDerivation) -> MixResult<Self> {
        let view = self.open_entry(name)?;
        Self::parse_with(view.into(), &self.config, deriver)
    }

    fn view(&self, name: String, entry: &MixEntry) -> MixResult<MixView> {
        let range = entry.absolute_range(self.data_base);
        let source_len = self.source.len() as u64;
        if range.end > source_len {
            return Err(MixError::EntryOutOfBounds {
                name,
                start: range.start,
                end: range.end,
                source_len,
            });
        }

        let data = self
            .source
            .slice(range.start as usize..range.end as usize);
        Ok(MixView::new(name, range.start, data))
    }

    /// All index rows, in no particular order
    pub fn entries(&self) -> impl Iterator<Item = &MixEntry> {
        self.index.iter()
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Absolute offset where payloads begin
    pub fn data_base(&self) -> u64 {
        self.data_base
    }

    /// Header layout the archive was read with
    pub fn format(&self) -> MixFormat {
        self.format
    }

    /// Flags word (empty for legacy archives)
    pub fn flags(&self) -> MixFlags {
        self.flags
    }

    /// Identifier scheme used for lookups
    pub fn id_hash(&self) -> IdHash {
        self.config.id_hash
    }

    /// Counts gathered while reading the index
    pub fn stats(&self) -> TableStats {
        self.index.stats()
    }

    /// Length of the underlying source in bytes
    pub fn source_len(&self) -> u64 {
        self.source.len() as u64
    }

    /// Digest stored at the end of checksummed archives
    ///
    /// The digest is returned as stored; it is not verified.
    pub fn checksum(&self) -> Option<[u8; CHECKSUM_SIZE]> {
        if !self.flags.has_checksum() {
            return None;
        }
        let len = self.source.len();
        if (len as u64) < self.data_base + CHECKSUM_SIZE as u64 {
            return None;
        }
        let mut digest = [0u8; CHECKSUM_SIZE];
        digest.copy_from_slice(&self.source[len - CHECKSUM_SIZE..]);
        Some(digest)
    }
}

impl fmt::Debug for MixFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MixFile")
            .field("format", &self.format)
            .field("flags", &self.flags)
            .field("entries", &self.index.len())
            .field("data_base", &self.data_base)
            .field("source_len", &self.source.len())
            .finish_non_exhaustive()
    }
}
