//! Indexed image codec boundary.
//!
//! The conversion pipeline only needs two operations: turn palette indices
//! plus a palette into an encoded image, and turn an encoded image back into
//! palette indices. [`IndexedCodec`] captures that; [`PngCodec`] implements
//! it with 8-bit indexed PNG.

use png::{BitDepth, ColorType, Transformations};
use thiserror::Error;
use tracing::debug;

use crate::Palette;

/// Largest palette an 8-bit indexed image can carry.
pub const MAX_PALETTE_COLORS: usize = 256;

/// Errors reported by an [`IndexedCodec`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// PNG encoder failure.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),

    /// PNG decoder failure, including malformed streams.
    #[error("PNG decoding failed: {0}")]
    Decode(#[from] png::DecodingError),

    /// Palette has no colors.
    #[error("palette is empty")]
    EmptyPalette,

    /// Palette has more colors than 8-bit indices can address.
    #[error("palette has {0} colors, at most {MAX_PALETTE_COLORS} are supported")]
    PaletteTooLarge(usize),

    /// A pixel refers to a color the palette does not have.
    #[error("pixel index {index} is outside the {colors}-color palette")]
    IndexOutOfPalette { index: u8, colors: usize },

    /// Pixel buffer length does not match the dimensions.
    #[error("expected {expected} pixels for the image dimensions, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// Dimensions cannot be represented.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// Image is not 8-bit indexed color.
    #[error("unsupported image format {color_type:?} at {bit_depth:?}, expected 8-bit indexed")]
    UnsupportedFormat {
        color_type: ColorType,
        bit_depth: BitDepth,
    },

    /// Image has no embedded palette.
    #[error("image has no palette")]
    MissingPalette,

    /// Embedded palette differs from the one supplied.
    #[error("image palette ({image_colors} colors) does not match the supplied palette ({palette_colors} colors)")]
    PaletteMismatch {
        image_colors: usize,
        palette_colors: usize,
    },
}

/// Raw palette indices decoded from an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Encoder/decoder for palette-indexed images.
pub trait IndexedCodec {
    /// Encode `width * height` palette indices.
    fn encode_indexed(
        &self,
        pixels: &[u8],
        palette: &Palette,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, CodecError>;

    /// Decode an image whose palette must equal `palette`.
    fn decode_indexed(&self, bytes: &[u8], palette: &Palette) -> Result<DecodedImage, CodecError>;
}

/// 8-bit indexed PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl IndexedCodec for PngCodec {
    fn encode_indexed(
        &self,
        pixels: &[u8],
        palette: &Palette,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, CodecError> {
        check_palette(palette)?;

        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or(CodecError::InvalidDimensions {
                width: width.into(),
                height: height.into(),
            })?;
        if pixels.len() != expected {
            return Err(CodecError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        check_indices(pixels, palette)?;

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(ColorType::Indexed);
            encoder.set_depth(BitDepth::Eight);
            encoder.set_palette(palette.as_bytes().to_vec());

            let mut writer = encoder.write_header()?;
            writer.write_image_data(pixels)?;
            writer.finish()?;
        }

        debug!(width, height, bytes = out.len(), "encoded indexed PNG");
        Ok(out)
    }

    fn decode_indexed(&self, bytes: &[u8], palette: &Palette) -> Result<DecodedImage, CodecError> {
        check_palette(palette)?;

        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(Transformations::IDENTITY);
        let mut reader = decoder.read_info()?;

        {
            let info = reader.info();
            if info.color_type != ColorType::Indexed || info.bit_depth != BitDepth::Eight {
                return Err(CodecError::UnsupportedFormat {
                    color_type: info.color_type,
                    bit_depth: info.bit_depth,
                });
            }

            let image_palette = info.palette.as_deref().ok_or(CodecError::MissingPalette)?;
            if image_palette != palette.as_bytes() {
                return Err(CodecError::PaletteMismatch {
                    image_colors: image_palette.len() / 3,
                    palette_colors: palette.len(),
                });
            }
        }

        let mut pixels = vec![0u8; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut pixels)?;
        pixels.truncate(frame.buffer_size());
        check_indices(&pixels, palette)?;

        debug!(width = frame.width, height = frame.height, "decoded indexed PNG");
        Ok(DecodedImage {
            pixels,
            width: frame.width,
            height: frame.height,
        })
    }
}

fn check_palette(palette: &Palette) -> Result<(), CodecError> {
    if palette.is_empty() {
        return Err(CodecError::EmptyPalette);
    }
    if palette.len() > MAX_PALETTE_COLORS {
        return Err(CodecError::PaletteTooLarge(palette.len()));
    }
    Ok(())
}

fn check_indices(pixels: &[u8], palette: &Palette) -> Result<(), CodecError> {
    match pixels.iter().find(|&&index| index as usize >= palette.len()) {
        Some(&index) => Err(CodecError::IndexOutOfPalette {
            index,
            colors: palette.len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RgbColor;

    fn palette(count: u8) -> Palette {
        Palette::new((0..count).map(|i| RgbColor::new(i, i.wrapping_mul(3), 255 - i)).collect())
    }

    #[test]
    fn test_roundtrip_preserves_pixels() {
        let palette = palette(16);
        let pixels: Vec<u8> = (0..7 * 5).map(|i| (i * 7 % 16) as u8).collect();

        let png = PngCodec.encode_indexed(&pixels, &palette, 7, 5).unwrap();
        let decoded = PngCodec.decode_indexed(&png, &palette).unwrap();

        assert_eq!(decoded.width, 7);
        assert_eq!(decoded.height, 5);
        assert_eq!(decoded.pixels, pixels);
    }

    #[test]
    fn test_encoded_palette_and_indices() {
        let palette = Palette::new(vec![
            RgbColor::new(255, 0, 0),
            RgbColor::new(0, 255, 0),
            RgbColor::new(0, 0, 255),
        ]);
        let pixels = [0u8, 1, 2, 2, 1, 0];

        let png = PngCodec.encode_indexed(&pixels, &palette, 3, 2).unwrap();

        let mut reader = png::Decoder::new(png.as_slice()).read_info().unwrap();
        assert_eq!(reader.info().color_type, ColorType::Indexed);
        assert_eq!(
            reader.info().palette.as_deref(),
            Some(&[255u8, 0, 0, 0, 255, 0, 0, 0, 255][..])
        );
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf).unwrap();
        assert_eq!(&buf[..frame.buffer_size()], &pixels);
    }

    #[test]
    fn test_index_outside_palette() {
        let err = PngCodec
            .encode_indexed(&[0, 1, 3, 0], &palette(3), 2, 2)
            .unwrap_err();
        assert!(matches!(err, CodecError::IndexOutOfPalette { index: 3, colors: 3 }));
    }

    #[test]
    fn test_pixel_count_mismatch() {
        let err = PngCodec.encode_indexed(&[0; 5], &palette(2), 2, 2).unwrap_err();
        assert!(matches!(
            err,
            CodecError::PixelCountMismatch { expected: 4, actual: 5 }
        ));
    }

    #[test]
    fn test_palette_mismatch_on_decode() {
        let png = PngCodec.encode_indexed(&[0, 1], &palette(4), 2, 1).unwrap();
        let err = PngCodec.decode_indexed(&png, &palette(5)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::PaletteMismatch { image_colors: 4, palette_colors: 5 }
        ));
    }

    #[test]
    fn test_malformed_stream() {
        let err = PngCodec.decode_indexed(b"not a png", &palette(2)).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn test_rgb_image_rejected() {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, 1, 1);
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[1, 2, 3]).unwrap();
            writer.finish().unwrap();
        }

        let err = PngCodec.decode_indexed(&out, &palette(2)).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_empty_palette() {
        let err = PngCodec.encode_indexed(&[0], &Palette::default(), 1, 1).unwrap_err();
        assert!(matches!(err, CodecError::EmptyPalette));
    }
}
