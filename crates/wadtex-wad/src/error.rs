//! Error types for the WAD crate.

use thiserror::Error;

/// Errors that can occur when working with WAD archives.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] wadtex_common::Error),

    /// The file does not start with the WAD magic.
    #[error("invalid WAD magic: expected \"{expected}\", got \"{actual}\"")]
    InvalidMagic { expected: String, actual: String },

    /// The header declares no items.
    #[error("invalid item count: {0} (must be positive)")]
    InvalidItemCount(i32),

    /// The header points the directory at a non-positive offset.
    #[error("invalid directory offset: {0} (must be positive)")]
    InvalidDirectoryOffset(i32),

    /// A directory record holds a value that cannot address a payload.
    #[error("item {name:?} has invalid {field}: {value}")]
    InvalidItemField {
        name: String,
        field: &'static str,
        value: i32,
    },

    /// An item name would escape the output directory.
    #[error("unsafe item name: {0:?}")]
    UnsafeItemName(String),

    /// The operation is declared but not available.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

/// Result type for WAD operations.
pub type Result<T> = std::result::Result<T, Error>;
