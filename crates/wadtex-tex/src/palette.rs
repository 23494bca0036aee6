//! Flat RGB palette files.
//!
//! A palette file is a bare sequence of `red, green, blue` byte triplets.
//! Entry `i` is the color of pixel value `i`.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;
use wadtex_common::{FromBytes, Immutable, IntoBytes, KnownLayout, ReadExt, Unaligned};

use crate::{Error, Result};

/// One palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(C)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Ordered color table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<RgbColor>,
}

impl Palette {
    /// Size of one entry on disk.
    pub const ENTRY_SIZE: u64 = 3;

    pub fn new(colors: Vec<RgbColor>) -> Self {
        Self { colors }
    }

    /// Open, verify and load a palette file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = BufReader::new(File::open(path)?);
        let size = Self::load_size(&mut file)?;
        Self::verify(path, size)?;
        Self::load(&mut file, size)
    }

    /// Byte length of a palette stream, leaving it rewound to the start.
    pub fn load_size<S: Seek + ?Sized>(stream: &mut S) -> Result<u64> {
        let size = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(0))?;
        Ok(size)
    }

    /// Reject empty palette files.
    pub fn verify(path: &Path, size: u64) -> Result<()> {
        if size == 0 {
            return Err(Error::InvalidPalette {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Read `size / 3` colors in file order.
    ///
    /// Trailing bytes that do not form a whole triplet are left unread.
    pub fn load<R: Read + ?Sized>(reader: &mut R, size: u64) -> Result<Self> {
        let count = size / Self::ENTRY_SIZE;
        let bytes = reader.read_fixed((count * Self::ENTRY_SIZE) as usize)?;

        let colors: Vec<RgbColor> = bytes
            .chunks_exact(Self::ENTRY_SIZE as usize)
            .map(|rgb| RgbColor::new(rgb[0], rgb[1], rgb[2]))
            .collect();

        if size % Self::ENTRY_SIZE != 0 {
            debug!(size, "palette size is not a multiple of 3, ignoring trailing bytes");
        }

        Ok(Self { colors })
    }

    #[inline]
    pub fn colors(&self) -> &[RgbColor] {
        &self.colors
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a pixel value, if the palette is long enough.
    #[inline]
    pub fn get(&self, index: u8) -> Option<RgbColor> {
        self.colors.get(index as usize).copied()
    }

    /// Colors as packed RGB bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.colors.as_slice().as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_nine_bytes_yield_three_colors() {
        let bytes = [255u8, 0, 0, 0, 255, 0, 0, 0, 255];
        let mut cursor = Cursor::new(bytes);

        let size = Palette::load_size(&mut cursor).unwrap();
        assert_eq!(size, 9);
        assert_eq!(cursor.position(), 0);

        let palette = Palette::load(&mut cursor, size).unwrap();
        assert_eq!(
            palette.colors(),
            &[
                RgbColor::new(255, 0, 0),
                RgbColor::new(0, 255, 0),
                RgbColor::new(0, 0, 255),
            ]
        );
        assert_eq!(palette.as_bytes(), &bytes);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let palette = Palette::load(&mut Cursor::new(bytes), bytes.len() as u64).unwrap();

        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get(1), Some(RgbColor::new(4, 5, 6)));
        assert_eq!(palette.get(2), None);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = Palette::verify(Path::new("empty.pal"), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidPalette { .. }));
        assert!(err.to_string().contains("empty.pal"));
    }

    #[test]
    fn test_short_palette_is_io_error() {
        let err = Palette::load(&mut Cursor::new([1u8, 2, 3]), 6).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_open_from_disk() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), [10u8, 20, 30, 40, 50, 60]).unwrap();

        let palette = Palette::open(file.path()).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get(0), Some(RgbColor::new(10, 20, 30)));
    }

    #[test]
    fn test_open_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = Palette::open(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidPalette { .. }));
    }
}
