//! Westwood MIX archive decoding
//!
//! MIX archives bundle many assets into one file. Entries are located through
//! an index keyed by a 32-bit hash of the filename; names themselves are never
//! stored.
//!
//! # Header Layouts
//!
//! ```text
//! Legacy (Tiberian Dawn)      Flagged (Red Alert and later)
//! 0  u16 count                0   u32 flags
//! 2  u32 body size            4   index table, or for encrypted archives:
//! 6  count × 12-byte entries  4     80-byte key source
//!    data section             84    Blowfish-encrypted index, 8-byte aligned
//!                                 data section
//! ```
//!
//! The decoder tells the layouts apart with the flags bitmask alone (see
//! [`MixFormat::sniff`]), recovers the index, and resolves where the data
//! section begins. Entry offsets are relative to that base.
//!
//! # Usage Examples
//!
//! ## Open an Archive
//!
//! ```rust,no_run
//! use mixkit_formats::mix::MixFile;
//!
//! let archive = MixFile::open("local.mix")?;
//! if archive.contains("rules.ini") {
//!     let view = archive.open_entry("rules.ini")?;
//!     println!("{} bytes at offset {}", view.len(), view.offset());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Classic Naming and Nested Archives
//!
//! ```rust,no_run
//! use mixkit_formats::mix::{MixConfig, MixFile};
//! use mixkit_crypto::WestwoodKeyDerivation;
//!
//! let config = MixConfig::classic();
//! let main = MixFile::open_with("main.mix", &config, &WestwoodKeyDerivation::new())?;
//! let conquer = main.open_nested("conquer.mix")?;
//! println!("{} entries", conquer.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod encrypted;
mod entry;
mod error;
mod file;
mod header;
mod table;
mod view;

pub use config::MixConfig;
pub use entry::MixEntry;
pub use error::{MixError, MixResult};
pub use file::{CHECKSUM_SIZE, MixFile};
pub use header::{
    HEADER_START, MixFlags, MixFormat, TABLE_PREFIX_SIZE, alignment_pad, encrypted_data_base,
    encrypted_span, table_len,
};
pub use table::{MixIndex, TableStats};
pub use view::MixView;
