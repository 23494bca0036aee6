//! Error types for TEX handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::CodecError;

/// Errors that can occur when working with TEX files and palettes.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] wadtex_common::Error),

    /// Palette file holds no data.
    #[error("invalid palette file {}: file is empty", .path.display())]
    InvalidPalette { path: PathBuf },

    /// TEX header failed validation.
    #[error("invalid TEX header in {}: {reason}", .path.display())]
    InvalidHeader { path: PathBuf, reason: String },

    /// Indexed image codec failure.
    #[error("image codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Result type for TEX operations.
pub type Result<T> = std::result::Result<T, Error>;
