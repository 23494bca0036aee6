//! TEX <-> indexed image conversion.

use tracing::info;

use crate::{CodecError, IndexedCodec, Palette, Result, TexHeader};

/// Encode a TEX image with `codec`.
///
/// The pixel data is handed to the codec unchanged, so a payload whose
/// length does not match the dimensions is reported by the codec.
pub fn to_indexed_image<C>(tex: &TexHeader, palette: &Palette, codec: &C) -> Result<Vec<u8>>
where
    C: IndexedCodec + ?Sized,
{
    let (width, height) = match (u32::try_from(tex.width), u32::try_from(tex.height)) {
        (Ok(width), Ok(height)) => (width, height),
        _ => {
            return Err(CodecError::InvalidDimensions {
                width: tex.width.into(),
                height: tex.height.into(),
            }
            .into())
        }
    };

    let bytes = codec.encode_indexed(&tex.data, palette, width, height)?;
    info!(name = %tex.name, width, height, "converted TEX to indexed image");
    Ok(bytes)
}

/// Decode an indexed image into a TEX image called `name`.
pub fn from_indexed_image<C>(
    bytes: &[u8],
    palette: &Palette,
    name: impl Into<String>,
    codec: &C,
) -> Result<TexHeader>
where
    C: IndexedCodec + ?Sized,
{
    let image = codec.decode_indexed(bytes, palette)?;

    let (width, height) = match (i32::try_from(image.width), i32::try_from(image.height)) {
        (Ok(width), Ok(height)) => (width, height),
        _ => {
            return Err(CodecError::InvalidDimensions {
                width: image.width.into(),
                height: image.height.into(),
            }
            .into())
        }
    };

    let tex = TexHeader::new(name, width, height, image.pixels);
    info!(name = %tex.name, width, height, "converted indexed image to TEX");
    Ok(tex)
}
