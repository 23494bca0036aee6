//! Directory records and the item type tag.

use std::borrow::Cow;
use std::fmt;

use wadtex_common::{
    cstr_field, encode_cstr_field, lossy_cstr_field, FromBytes, Immutable, IntoBytes, KnownLayout,
    LeI32, Unaligned,
};

use crate::Result;

/// Kind of payload stored in a WAD item.
///
/// The set of known tags is closed, but any other byte is still a valid item
/// and is carried as [`WadItemType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WadItemType {
    None,
    Label,
    /// First of the "lumpy" tags. Shares its byte with [`WadItemType::Palette`].
    Lumpy,
    Palette,
    QTex,
    QPic,
    Sound,
    MipTex,
    Unknown(u8),
}

impl WadItemType {
    /// Classify a raw type byte.
    ///
    /// `64` is reported as [`WadItemType::Palette`], the only item kind that
    /// actually uses the lumpy base value.
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::None,
            1 => Self::Label,
            64 => Self::Palette,
            65 => Self::QTex,
            66 => Self::QPic,
            67 => Self::Sound,
            68 => Self::MipTex,
            other => Self::Unknown(other),
        }
    }

    /// The byte stored on disk for this type.
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Label => 1,
            Self::Lumpy | Self::Palette => 64,
            Self::QTex => 65,
            Self::QPic => 66,
            Self::Sound => 67,
            Self::MipTex => 68,
            Self::Unknown(byte) => byte,
        }
    }

    /// Display name. Unrecognized bytes are all `"Unknown"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Label => "Label",
            Self::Lumpy => "Lumpy",
            Self::Palette => "Palette",
            Self::QTex => "QTex",
            Self::QPic => "QPic",
            Self::Sound => "Sound",
            Self::MipTex => "MipTex",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl From<u8> for WadItemType {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

impl fmt::Display for WadItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name of a raw type byte.
#[inline]
pub const fn type_name(type_byte: u8) -> &'static str {
    WadItemType::from_byte(type_byte).name()
}

/// One record of the item directory.
///
/// Location of the payload within the archive, its size, the type tag and a
/// name of up to 15 bytes (null-terminated, 16-byte field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct WadItemHeader {
    position: LeI32,
    size: LeI32,
    compressed_size: LeI32,
    item_type: u8,
    compression_type: u8,
    paddings: [u8; 2],
    name: [u8; 16],
}

const _: () = assert!(std::mem::size_of::<WadItemHeader>() == WadItemHeader::SIZE);

impl WadItemHeader {
    /// Size of a directory record on disk.
    pub const SIZE: usize = 32;

    /// Width of the name field, terminator included.
    pub const NAME_LEN: usize = 16;

    /// Build an uncompressed record.
    pub fn new(position: i32, size: i32, item_type: u8, name: &str) -> Result<Self> {
        Ok(Self {
            position: LeI32::new(position),
            size: LeI32::new(size),
            compressed_size: LeI32::new(size),
            item_type,
            compression_type: 0,
            paddings: [0; 2],
            name: encode_cstr_field(name)?,
        })
    }

    /// Absolute byte offset of the payload.
    #[inline]
    pub fn position(&self) -> i32 {
        self.position.get()
    }

    /// Payload length in bytes.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size.get()
    }

    #[inline]
    pub fn compressed_size(&self) -> i32 {
        self.compressed_size.get()
    }

    /// Type tag exactly as stored.
    #[inline]
    pub fn type_byte(&self) -> u8 {
        self.item_type
    }

    #[inline]
    pub fn item_type(&self) -> WadItemType {
        WadItemType::from_byte(self.item_type)
    }

    /// Compression scheme selector. Not interpreted.
    #[inline]
    pub fn compression_type(&self) -> u8 {
        self.compression_type
    }

    /// Name bytes before the terminator.
    #[inline]
    pub fn name_bytes(&self) -> &[u8] {
        cstr_field(&self.name)
    }

    /// Name as text, with invalid UTF-8 replaced.
    pub fn name(&self) -> Cow<'_, str> {
        lossy_cstr_field(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use wadtex_common::ReadExt;

    use super::*;

    #[test]
    fn test_known_type_names() {
        let expected = [
            (0, "None"),
            (1, "Label"),
            (64, "Palette"),
            (65, "QTex"),
            (66, "QPic"),
            (67, "Sound"),
            (68, "MipTex"),
        ];
        for (byte, name) in expected {
            assert_eq!(type_name(byte), name);
            assert_eq!(WadItemType::from_byte(byte).as_byte(), byte);
        }
    }

    #[test]
    fn test_lumpy_shares_palette_byte() {
        assert_eq!(WadItemType::Lumpy.as_byte(), WadItemType::Palette.as_byte());
        assert_eq!(WadItemType::Lumpy.name(), "Lumpy");
    }

    #[test]
    fn test_unknown_type_keeps_byte() {
        for byte in [2u8, 63, 69, 0x7F, 0xFF] {
            let ty = WadItemType::from(byte);
            assert_eq!(ty, WadItemType::Unknown(byte));
            assert_eq!(ty.as_byte(), byte);
            assert_eq!(type_name(byte), "Unknown");
        }
    }

    #[test]
    fn test_parse_record() {
        let mut bytes = [0u8; WadItemHeader::SIZE];
        bytes[0..4].copy_from_slice(&20049i32.to_le_bytes());
        bytes[4..8].copy_from_slice(&3001i32.to_le_bytes());
        bytes[8..12].copy_from_slice(&1500i32.to_le_bytes());
        bytes[12] = 68;
        bytes[13] = 1;
        bytes[14] = 0xAA;
        bytes[16..29].copy_from_slice(b"howdy_partner");

        let item: WadItemHeader = Cursor::new(bytes).read_struct().unwrap();

        assert_eq!(item.position(), 20049);
        assert_eq!(item.size(), 3001);
        assert_eq!(item.compressed_size(), 1500);
        assert_eq!(item.item_type(), WadItemType::MipTex);
        assert_eq!(item.compression_type(), 1);
        assert_eq!(item.name(), "howdy_partner");
    }

    #[test]
    fn test_new_record_layout() {
        let item = WadItemHeader::new(12, 5, 66, "conback").unwrap();
        let bytes = item.as_bytes();

        assert_eq!(bytes.len(), WadItemHeader::SIZE);
        assert_eq!(&bytes[0..4], &12i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &5i32.to_le_bytes());
        assert_eq!(bytes[12], 66);
        assert_eq!(&bytes[16..24], b"conback\0");
    }

    #[test]
    fn test_name_too_long() {
        assert!(WadItemHeader::new(0, 0, 0, "sixteen_bytes_xx").is_err());
    }
}
