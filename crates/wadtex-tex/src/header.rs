//! TEX header and pixel payload.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::debug;
use wadtex_common::{encode_cstr_field, lossy_cstr_field, BinaryReader};

use crate::{Error, Result};

/// A TEX image: name, dimensions and one palette index per pixel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TexHeader {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub data: Vec<u8>,
}

impl TexHeader {
    /// Width of the on-disk name field, terminator included.
    pub const NAME_LEN: usize = 16;

    pub fn new(name: impl Into<String>, width: i32, height: i32, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            data,
        }
    }

    /// Load and verify a TEX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let header = Self::load(&mut file)?;
        header.verify(path)?;
        Ok(header)
    }

    /// Read a TEX stream to its end.
    ///
    /// Everything after the height is taken as pixel data; its length is not
    /// compared with `width * height`.
    pub fn load<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::parse(&bytes)
    }

    /// Parse a TEX image from bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(bytes);
        let name = lossy_cstr_field(reader.read_bytes(Self::NAME_LEN)?).into_owned();
        let width = reader.read_i32()?;
        let height = reader.read_i32()?;
        let data = reader.remaining_bytes().to_vec();

        debug!(%name, width, height, payload = data.len(), "parsed TEX header");

        Ok(Self {
            name,
            width,
            height,
            data,
        })
    }

    /// Check that the name is set, both dimensions are positive and pixel
    /// data is present. `path` names the source in the error.
    pub fn verify(&self, path: &Path) -> Result<()> {
        let reason = if self.name.is_empty() {
            "name is empty".to_string()
        } else if self.width <= 0 {
            format!("width must be positive, got {}", self.width)
        } else if self.height <= 0 {
            format!("height must be positive, got {}", self.height)
        } else if self.data.is_empty() {
            "pixel data is missing".to_string()
        } else {
            return Ok(());
        };

        Err(Error::InvalidHeader {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// `width * height`, when both are positive and the product fits.
    pub fn pixel_count(&self) -> Option<usize> {
        let width = usize::try_from(self.width).ok().filter(|&w| w > 0)?;
        let height = usize::try_from(self.height).ok().filter(|&h| h > 0)?;
        width.checked_mul(height)
    }

    /// Whether the payload holds exactly one byte per pixel.
    pub fn payload_matches_dimensions(&self) -> bool {
        self.pixel_count() == Some(self.data.len())
    }

    /// Write `width`, `height` and the pixel data.
    ///
    /// The name is not written and the data carries no length prefix.
    pub fn save<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_i32::<LittleEndian>(self.width)?;
        writer.write_i32::<LittleEndian>(self.height)?;
        writer.write_all(&self.data)?;
        Ok(())
    }

    /// Write the full layout: the name field, then what [`TexHeader::save`]
    /// writes. The result can be read back with [`TexHeader::load`].
    pub fn save_named<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let name: [u8; TexHeader::NAME_LEN] = encode_cstr_field(&self.name)?;
        writer.write_all(&name)?;
        self.save(writer)
    }

    /// [`TexHeader::save`] to a new file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.save(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// [`TexHeader::save_named`] to a new file.
    pub fn save_named_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.save_named(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn tex_bytes(name: &[u8], width: i32, height: i32, data: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8; TexHeader::NAME_LEN];
        bytes[..name.len()].copy_from_slice(name);
        bytes.extend(width.to_le_bytes());
        bytes.extend(height.to_le_bytes());
        bytes.extend(data);
        bytes
    }

    #[test]
    fn test_load_header() {
        let bytes = tex_bytes(b"brick", 2, 3, &[0, 1, 2, 3, 4, 5]);
        let tex = TexHeader::load(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(tex.name, "brick");
        assert_eq!(tex.width, 2);
        assert_eq!(tex.height, 3);
        assert_eq!(tex.data, [0, 1, 2, 3, 4, 5]);
        assert!(tex.payload_matches_dimensions());
        assert!(tex.verify(Path::new("brick.tex")).is_ok());
    }

    #[test]
    fn test_non_utf8_name_is_lossy() {
        let bytes = tex_bytes(b"caf\xe9x", 1, 1, &[7]);
        let tex = TexHeader::load(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(tex.name, "caf\u{FFFD}x");
        assert!(tex.verify(Path::new("cafe.tex")).is_ok());
    }

    #[test]
    fn test_short_header_fails() {
        let err = TexHeader::parse(&[0u8; 20]).unwrap_err();
        assert!(matches!(
            err,
            Error::Common(wadtex_common::Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        for (width, height) in [(0, 4), (-3, 4), (4, 0), (4, -1), (i32::MIN, 1)] {
            let tex = TexHeader::new("wall", width, height, vec![7; 16]);
            let err = tex.verify(Path::new("wall.tex")).unwrap_err();

            assert!(matches!(err, Error::InvalidHeader { .. }), "{width}x{height}");
            assert!(err.to_string().contains("wall.tex"));
        }
    }

    #[test]
    fn test_empty_name_or_data_rejected() {
        let unnamed = TexHeader::new("", 1, 1, vec![0]);
        assert!(unnamed.verify(Path::new("a.tex")).is_err());

        let empty = TexHeader::new("wall", 1, 1, Vec::new());
        assert!(empty.verify(Path::new("a.tex")).is_err());
    }

    // The payload length is not checked against the dimensions when loading;
    // truncated and oversized payloads are both accepted as-is.
    #[test]
    fn test_payload_length_not_cross_checked() {
        for data in [&[1u8, 2][..], &[1u8; 40][..]] {
            let bytes = tex_bytes(b"odd", 4, 4, data);
            let tex = TexHeader::parse(&bytes).unwrap();

            assert_eq!(tex.data, data);
            assert!(tex.verify(Path::new("odd.tex")).is_ok());
            assert!(!tex.payload_matches_dimensions());
        }
    }

    #[test]
    fn test_save_layout() {
        let tex = TexHeader::new("ignored", 2, 1, vec![9, 8]);
        let mut out = Vec::new();
        tex.save(&mut out).unwrap();

        let mut expected = Vec::new();
        expected.extend(2i32.to_le_bytes());
        expected.extend(1i32.to_le_bytes());
        expected.extend([9, 8]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_save_named_reloads() {
        let tex = TexHeader::new("sky1", 3, 2, vec![1, 2, 3, 4, 5, 6]);
        let file = tempfile::NamedTempFile::new().unwrap();
        tex.save_named_to(file.path()).unwrap();

        let loaded = TexHeader::open(file.path()).unwrap();
        assert_eq!(loaded, tex);
    }

    #[test]
    fn test_save_named_rejects_long_name() {
        let tex = TexHeader::new("a_name_that_is_too_long", 1, 1, vec![0]);
        let err = tex.save_named(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Common(_)));
    }
}
