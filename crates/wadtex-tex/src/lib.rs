//! TEX texture handling.
//!
//! A TEX file stores one palette index per pixel:
//!
//! - `name` - 16-byte null-terminated field
//! - `width`, `height` - little-endian `i32`
//! - pixel data - every remaining byte
//!
//! Colors come from a separate flat [`Palette`] file. This crate converts
//! between TEX data and indexed images through the [`IndexedCodec`] trait,
//! with [`PngCodec`] as the bundled implementation.
//!
//! # Example
//!
//! ```no_run
//! use wadtex_tex::{to_indexed_image, Palette, PngCodec, TexHeader};
//!
//! let tex = TexHeader::open("wall.tex")?;
//! let palette = Palette::open("palette.lmp")?;
//! let png = to_indexed_image(&tex, &palette, &PngCodec)?;
//! std::fs::write("wall.png", png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod codec;
mod convert;
mod error;
mod header;
mod palette;

pub use codec::{CodecError, DecodedImage, IndexedCodec, PngCodec};
pub use convert::{from_indexed_image, to_indexed_image};
pub use error::{Error, Result};
pub use header::TexHeader;
pub use palette::{Palette, RgbColor};
