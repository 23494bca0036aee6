//! Common utilities for wadtex.
//!
//! This crate provides the low-level pieces shared by the WAD and TEX crates:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices
//! - [`ReadExt`] / [`WriteExt`] - Fixed-size reads and writes on streams
//! - [`cstr_field`] - Null-terminated fixed-width name fields

mod error;
mod field;
mod reader;

pub use error::{Error, Result};
pub use field::{cstr_field, encode_cstr_field, lossy_cstr_field};
pub use reader::{BinaryReader, ReadExt, WriteExt};

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Little-endian integer wrappers used by the on-disk records.
pub use zerocopy::byteorder::little_endian::I32 as LeI32;
