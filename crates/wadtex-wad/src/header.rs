//! WAD file header.

use std::io::Read;

use wadtex_common::{FromBytes, Immutable, IntoBytes, KnownLayout, LeI32, ReadExt, Unaligned};

use crate::{Error, Result};

/// WAD file magic bytes.
pub const MAGIC: [u8; 4] = *b"WAD2";

/// The header at the start of every WAD file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct WadHeader {
    code: [u8; 4],
    items_count: LeI32,
    offset: LeI32,
}

const _: () = assert!(std::mem::size_of::<WadHeader>() == WadHeader::SIZE);

impl WadHeader {
    /// Size of the header on disk.
    pub const SIZE: usize = 12;

    /// Create a header carrying the expected magic.
    pub fn new(items_count: i32, offset: i32) -> Self {
        Self::with_code(MAGIC, items_count, offset)
    }

    /// Create a header with an arbitrary magic code.
    pub fn with_code(code: [u8; 4], items_count: i32, offset: i32) -> Self {
        Self {
            code,
            items_count: LeI32::new(items_count),
            offset: LeI32::new(offset),
        }
    }

    /// Read the header from the current position of `reader`.
    ///
    /// The header is not validated; call [`WadHeader::verify`] afterwards.
    pub fn load<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        Ok(reader.read_struct()?)
    }

    /// Check the magic code and that the count and offset are positive.
    pub fn verify(&self) -> Result<()> {
        if self.code != MAGIC {
            return Err(Error::InvalidMagic {
                expected: MAGIC.escape_ascii().to_string(),
                actual: self.code.escape_ascii().to_string(),
            });
        }
        if self.items_count() <= 0 {
            return Err(Error::InvalidItemCount(self.items_count()));
        }
        if self.offset() <= 0 {
            return Err(Error::InvalidDirectoryOffset(self.offset()));
        }
        Ok(())
    }

    /// The magic code as stored.
    #[inline]
    pub fn code(&self) -> [u8; 4] {
        self.code
    }

    /// Number of directory records.
    #[inline]
    pub fn items_count(&self) -> i32 {
        self.items_count.get()
    }

    /// Byte offset of the directory from the start of the file.
    #[inline]
    pub fn offset(&self) -> i32 {
        self.offset.get()
    }
}
