//! Zero-copy views onto archive entries

use bytes::Bytes;
use std::fmt;
use std::io::Cursor;

/// Window onto one entry's payload
///
/// A view shares the archive's buffer; cloning it or taking [`bytes`](Self::bytes)
/// only bumps a reference count. Views carry no cursor of their own, so any
/// number of them can be read from different threads at once.
#[derive(Clone, PartialEq, Eq)]
pub struct MixView {
    name: String,
    offset: u64,
    data: Bytes,
}

impl MixView {
    pub(crate) fn new(name: String, offset: u64, data: Bytes) -> Self {
        Self { name, offset, data }
    }

    /// Name the entry was opened with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute offset of the payload in the archive
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the payload
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the payload
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// Copy the payload into an owned buffer
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    /// Independent `Read + Seek` cursor over the payload
    pub fn cursor(&self) -> Cursor<Bytes> {
        Cursor::new(self.data.clone())
    }
}

impl AsRef<[u8]> for MixView {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<MixView> for Bytes {
    fn from(view: MixView) -> Self {
        view.data
    }
}

impl fmt::Debug for MixView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MixView")
            .field("name", &self.name)
            .field("offset", &self.offset)
            .field("len", &self.data.len())
            .finish()
    }
}
