//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! GNU .mo file format writer and reader
//!
//! Layout written by [`encode`] (all words little-endian u32):
//!
//! ```text
//!  0: magic 0x950412de       4: revision 0
//!  8: N strings             12: O, original table offset (28)
//! 16: T, translation table  20: hash table size (0)
//! 24: hash table offset (O)
//! 28: N x (length, offset) for keys, then N x (length, offset) for values
//! 28 + 16N: key blob, then value blob, every string NUL-terminated
//! ```
//!
//! Offsets in the tables are absolute file offsets. The hash table is
//! never written; loaders fall back to binary search, so the tables are
//! sorted by key.

use std::collections::BTreeMap;
use std::io;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

use crate::catalog_lib::catalog::{Catalog, CONTEXT_SEPARATOR};
use crate::catalog_lib::header::PoHeader;

/// Magic number, as read with the file's own byte order
pub const MO_MAGIC: u32 = 0x950412de;

/// Magic number seen when reading a big-endian file as little-endian
pub const MO_MAGIC_SWAPPED: u32 = 0xde120495;

/// Size of the fixed header in bytes (7 words)
pub const HEADER_SIZE: u32 = 28;

/// Size of one (length, offset) descriptor
const DESCRIPTOR_SIZE: u32 = 8;

/// Error type for .mo file operations
#[derive(Debug, thiserror::Error)]
pub enum MoError {
    /// No entry has a translation; there is nothing to compile
    #[error("no translated messages, nothing to compile")]
    EmptyCatalog,
    #[error("catalog too large for the .mo format")]
    TooLarge,
    #[error("invalid magic number: 0x{0:08x}")]
    InvalidMagic(u32),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Header of a .mo file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoHeader {
    pub magic: u32,
    pub revision: u32,
    pub nstrings: u32,
    pub orig_tab_offset: u32,
    pub trans_tab_offset: u32,
    pub hash_tab_size: u32,
    pub hash_tab_offset: u32,
}

fn to_u32(n: usize) -> Result<u32, MoError> {
    u32::try_from(n).map_err(|_| MoError::TooLarge)
}

/// Concatenate NUL-terminated strings starting at file offset `start`,
/// returning the blob and the (length, offset) descriptor of each string.
fn build_blob<'a>(
    strings: impl Iterator<Item = &'a str>,
    start: u32,
) -> Result<(Vec<u8>, Vec<(u32, u32)>), MoError> {
    let mut blob = Vec::new();
    let mut descriptors = Vec::new();

    for s in strings {
        let offset = start
            .checked_add(to_u32(blob.len())?)
            .ok_or(MoError::TooLarge)?;
        descriptors.push((to_u32(s.len())?, offset));
        blob.extend_from_slice(s.as_bytes());
        blob.push(0);
    }

    Ok((blob, descriptors))
}

/// Compile the translated entries of a catalog into .mo bytes.
///
/// Untranslated entries are left out. Returns [`MoError::EmptyCatalog`]
/// when nothing is left. Output depends only on the catalog contents.
pub fn encode(catalog: &Catalog) -> Result<Vec<u8>, MoError> {
    // sorted by key bytes; a later duplicate replaces an earlier one
    let messages: BTreeMap<String, &str> = catalog
        .translated()
        .map(|e| (e.lookup_key().into_owned(), e.translation.as_str()))
        .collect();

    if messages.is_empty() {
        return Err(MoError::EmptyCatalog);
    }

    let nstrings = to_u32(messages.len())?;
    let table_size = nstrings
        .checked_mul(DESCRIPTOR_SIZE)
        .ok_or(MoError::TooLarge)?;
    let orig_tab_offset = HEADER_SIZE;
    let trans_tab_offset = orig_tab_offset + table_size;
    let key_blob_start = trans_tab_offset
        .checked_add(table_size)
        .ok_or(MoError::TooLarge)?;

    let (key_blob, key_desc) = build_blob(messages.keys().map(String::as_str), key_blob_start)?;
    let value_blob_start = key_blob_start
        .checked_add(to_u32(key_blob.len())?)
        .ok_or(MoError::TooLarge)?;
    let (value_blob, value_desc) = build_blob(messages.values().copied(), value_blob_start)?;

    let mut data =
        Vec::with_capacity(key_blob_start as usize + key_blob.len() + value_blob.len());

    data.write_u32::<LittleEndian>(MO_MAGIC)?;
    data.write_u32::<LittleEndian>(0)?; // revision
    data.write_u32::<LittleEndian>(nstrings)?;
    data.write_u32::<LittleEndian>(orig_tab_offset)?;
    data.write_u32::<LittleEndian>(trans_tab_offset)?;
    data.write_u32::<LittleEndian>(0)?; // hash_tab_size
    data.write_u32::<LittleEndian>(orig_tab_offset)?; // hash_tab_offset

    for (len, offset) in key_desc.iter().chain(value_desc.iter()) {
        data.write_u32::<LittleEndian>(*len)?;
        data.write_u32::<LittleEndian>(*offset)?;
    }

    data.extend_from_slice(&key_blob);
    data.extend_from_slice(&value_blob);

    log::debug!("mo: encoded {} messages, {} bytes", nstrings, data.len());
    Ok(data)
}

/// Parsed .mo file
#[derive(Debug, Clone)]
pub struct MoFile {
    pub header: MoHeader,
    pub is_little_endian: bool,
    /// (key, translation) pairs in table order
    pub messages: Vec<(String, String)>,
    sorted: bool,
}

impl MoFile {
    /// Parse .mo bytes of either byte order.
    pub fn read(data: &[u8]) -> Result<Self, MoError> {
        if data.len() < HEADER_SIZE as usize {
            return Err(MoError::InvalidFormat("file too small".to_string()));
        }

        let is_little_endian = match LittleEndian::read_u32(&data[0..4]) {
            MO_MAGIC => true,
            MO_MAGIC_SWAPPED => false,
            magic => return Err(MoError::InvalidMagic(magic)),
        };

        let word = |index: usize| read_u32(data, index * 4, is_little_endian);
        let header = MoHeader {
            magic: MO_MAGIC,
            revision: word(1),
            nstrings: word(2),
            orig_tab_offset: word(3),
            trans_tab_offset: word(4),
            hash_tab_size: word(5),
            hash_tab_offset: word(6),
        };

        // only the major revision matters to readers
        if header.revision >> 16 != 0 {
            return Err(MoError::InvalidFormat(format!(
                "unsupported revision: {}",
                header.revision
            )));
        }

        let mut messages = Vec::new();
        for i in 0..header.nstrings as usize {
            let key = read_string(data, header.orig_tab_offset as usize, i, is_little_endian)?;
            let value = read_string(data, header.trans_tab_offset as usize, i, is_little_endian)?;
            messages.push((key, value));
        }

        let sorted = messages.windows(2).all(|w| w[0].0 < w[1].0);

        Ok(MoFile {
            header,
            is_little_endian,
            messages,
            sorted,
        })
    }

    /// Look up a translation by its full key.
    pub fn gettext(&self, key: &str) -> Option<&str> {
        let found = if self.sorted {
            self.messages
                .binary_search_by(|(k, _)| k.as_str().cmp(key))
                .ok()
        } else {
            self.messages.iter().position(|(k, _)| k == key)
        };
        found.map(|i| self.messages[i].1.as_str())
    }

    /// Look up a translation with context.
    pub fn pgettext(&self, context: &str, msgid: &str) -> Option<&str> {
        self.gettext(&format!("{}{}{}", context, CONTEXT_SEPARATOR, msgid))
    }

    /// Header entry (empty key), written by msgfmt but not by [`encode`]
    pub fn po_header(&self) -> Option<PoHeader> {
        self.gettext("").map(PoHeader::parse)
    }

    /// Number of messages, not counting the header entry
    pub fn message_count(&self) -> usize {
        self.messages.iter().filter(|(k, _)| !k.is_empty()).count()
    }
}

fn read_u32(data: &[u8], offset: usize, le: bool) -> u32 {
    let bytes = &data[offset..offset + 4];
    if le {
        LittleEndian::read_u32(bytes)
    } else {
        BigEndian::read_u32(bytes)
    }
}

/// Read string `index` through the descriptor table at `table`.
fn read_string(data: &[u8], table: usize, index: usize, le: bool) -> Result<String, MoError> {
    let desc = table + index * DESCRIPTOR_SIZE as usize;
    if desc + DESCRIPTOR_SIZE as usize > data.len() {
        return Err(MoError::InvalidFormat(
            "string descriptor out of bounds".to_string(),
        ));
    }

    let length = read_u32(data, desc, le) as usize;
    let start = read_u32(data, desc + 4, le) as usize;
    let end = start + length;
    if end > data.len() {
        return Err(MoError::InvalidFormat(
            "string data out of bounds".to_string(),
        ));
    }

    Ok(String::from_utf8(data[start..end].to_vec())?)
}
