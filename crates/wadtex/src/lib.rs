//! wadtex - WAD archive and TEX texture library.
//!
//! This crate provides a unified interface to the wadtex crates.
//!
//! # Crates
//!
//! - [`wadtex_common`] - Common utilities (binary reading, fixed-width fields)
//! - [`wadtex_wad`] - WAD container reading and item extraction
//! - [`wadtex_tex`] - TEX textures, palettes and indexed PNG conversion
//!
//! # Example
//!
//! ```no_run
//! use wadtex::prelude::*;
//!
//! let mut archive = WadArchive::open("gfx.wad")?;
//! let palette = Palette::open("palette.lmp")?;
//!
//! if let Some(item) = archive.find("wall").copied() {
//!     let tex = TexHeader::parse(&archive.read(&item)?)?;
//!     let png = to_indexed_image(&tex, &palette, &PngCodec)?;
//!     std::fs::write("wall.png", png)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use wadtex_common as common;
pub use wadtex_tex as tex;
pub use wadtex_wad as wad;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use wadtex_tex::{
        from_indexed_image, to_indexed_image, IndexedCodec, Palette, PngCodec, RgbColor, TexHeader,
    };
    pub use wadtex_wad::{
        load_items_header, type_name, WadArchive, WadHeader, WadItemHeader, WadItemType, WadSummary,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
