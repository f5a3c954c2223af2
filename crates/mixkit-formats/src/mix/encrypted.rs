//! Encrypted MIX index recovery
//!
//! Layout after the flags word:
//!
//! ```text
//! 4   80 bytes  key source (RSA-obfuscated Blowfish key)
//! 84  n bytes   Blowfish-encrypted index table, padded to whole blocks
//! 84+n          data section
//! ```
//!
//! The entry count sits inside the ciphertext, so the first block is
//! decrypted on its own to learn how much ciphertext follows. The whole span is
//! then decrypted and the table read again from the plaintext; that second
//! read is the one the index is built from.

use super::error::{MixError, MixResult};
use super::header::{HEADER_START, alignment_pad, encrypted_span, table_len};
use super::table::MixIndex;
use binrw::BinRead;
use mixkit_crypto::{BLOCK_SIZE, KEY_SOURCE_SIZE, KeyDerivation, MixCipher};
use std::io::Cursor;
use tracing::debug;

/// Index and data-section base recovered from an encrypted header
#[derive(Debug, Clone)]
pub(crate) struct EncryptedIndex {
    pub index: MixIndex,
    pub data_base: u64,
}

/// Decrypt the index of an archive whose reader sits just past the flags word
pub(crate) fn read_encrypted_index(
    reader: &mut Cursor<&[u8]>,
    deriver: &dyn KeyDerivation,
) -> MixResult<EncryptedIndex> {
    let source_len = reader.get_ref().len() as u64;
    let first_block_end = HEADER_START + BLOCK_SIZE as u64;
    if source_len < first_block_end {
        return Err(MixError::malformed(format!(
            "encrypted header needs {first_block_end} bytes, archive is {source_len}"
        )));
    }

    let key_source = <[u8; KEY_SOURCE_SIZE]>::read_le(reader)?;
    let key = deriver.derive_key(&key_source)?;
    let cipher = MixCipher::new(&key)?;

    let first_block = <[u8; BLOCK_SIZE]>::read_le(reader)?;
    let mut peek = Cursor::new(cipher.decrypt(&first_block)?);
    let count = u16::read_le(&mut peek)?;
    let _body_size = u32::read_le(&mut peek)?;

    let len = table_len(count);
    let span_end = HEADER_START + encrypted_span(len);
    if source_len < span_end {
        return Err(MixError::malformed(format!(
            "encrypted index of {count} entries ends at {span_end}, archive is {source_len} bytes"
        )));
    }

    reader.set_position(HEADER_START);
    let start = HEADER_START as usize;
    let end = span_end as usize;
    let plain = cipher.decrypt(&reader.get_ref()[start..end])?;
    reader.set_position(span_end);

    let index = MixIndex::parse(&mut Cursor::new(plain))?;
    let data_base = HEADER_START + len + alignment_pad(len);
    debug!(
        "decrypted index: {} entries, data section at {}",
        index.len(),
        data_base
    );

    Ok(EncryptedIndex { index, data_base })
}
