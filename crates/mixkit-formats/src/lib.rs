//! Read-only decoder for Westwood MIX archives
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
//! This crate decodes the MIX container used by Tiberian Dawn, Red Alert,
//! Tiberian Sun and Red Alert 2 to bundle game assets.
//!
//! # Supported Layouts
//!
//! - **Legacy**: unflagged index at offset 0
//! - **Plain**: flags word without checksum or encryption
//! - **Checksummed**: flags word with a trailing 20-byte digest
//! - **Encrypted**: Blowfish-encrypted index with an RSA-obfuscated key
//!
//! # Design Principles
//!
//! - **Zero-Copy Access**: entry views are slices of one shared buffer
//! - **Lenient Tables**: a short index yields the entries that fit
//! - **No Shared Cursor**: every view reads independently, across threads
//!
//! Writing archives is out of scope.

#![warn(missing_docs)]

pub mod mix;

pub use mix::{MixError, MixFile, MixResult, MixView};
