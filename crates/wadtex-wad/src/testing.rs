//! In-memory WAD fixtures for tests.

use wadtex_common::IntoBytes;

use crate::{WadHeader, WadItemHeader};

pub(crate) struct TestItem<'a> {
    pub name: &'a str,
    pub type_byte: u8,
    pub payload: &'a [u8],
}

impl<'a> TestItem<'a> {
    pub fn new(name: &'a str, type_byte: u8, payload: &'a [u8]) -> Self {
        Self {
            name,
            type_byte,
            payload,
        }
    }
}

/// Header, then the directory right after it at offset 12, then payloads.
pub(crate) fn build_wad(items: &[TestItem<'_>]) -> Vec<u8> {
    let dir_offset = WadHeader::SIZE;
    let mut position = dir_offset + items.len() * WadItemHeader::SIZE;

    let mut bytes = Vec::new();
    bytes.extend(WadHeader::new(items.len() as i32, dir_offset as i32).as_bytes());

    for item in items {
        let record = WadItemHeader::new(
            position as i32,
            item.payload.len() as i32,
            item.type_byte,
            item.name,
        )
        .unwrap();
        bytes.extend(record.as_bytes());
        position += item.payload.len();
    }

    for item in items {
        bytes.extend(item.payload);
    }

    bytes
}
