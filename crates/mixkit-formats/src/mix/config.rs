//! Decoder configuration

use mixkit_crypto::IdHash;

/// Options applied when opening an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixConfig {
    /// Scheme used to turn filenames into identifiers
    pub id_hash: IdHash,
    /// Log a warning for entries that point past the end of the archive
    pub check_bounds: bool,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            id_hash: IdHash::Crc32,
            check_bounds: true,
        }
    }
}

impl MixConfig {
    /// Tiberian Dawn / Red Alert naming
    pub fn classic() -> Self {
        Self::default().with_id_hash(IdHash::Rotate)
    }

    /// Use another identifier scheme
    pub fn with_id_hash(mut self, id_hash: IdHash) -> Self {
        self.id_hash = id_hash;
        self
    }

    /// Enable or disable the post-parse bounds scan
    pub fn with_bounds_check(mut self, enabled: bool) -> Self {
        self.check_bounds = enabled;
        self
    }
}
