//! Binary reading for fixed-layout records.
//!
//! [`BinaryReader`] walks a byte slice that is already in memory, while
//! [`ReadExt`] and [`WriteExt`] add fixed-size record access to any stream.
//! Both fail explicitly on short input instead of returning partial data.

use std::io::{self, Read, Write};

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::{cstr_field, Error, Result};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// # Example
///
/// ```
/// use wadtex_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0xFF];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_i32().unwrap(), 0x04030201);
/// assert_eq!(reader.remaining_bytes(), &[0xFF]);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a string from a fixed-size buffer, stopping at the first null.
    pub fn read_string_in_buffer(&mut self, buffer_size: usize) -> Result<&'a str> {
        let bytes = self.read_bytes(buffer_size)?;
        std::str::from_utf8(cstr_field(bytes)).map_err(Error::Utf8)
    }

    /// Read a struct using zerocopy.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }
}

/// Fixed-size reads from a stream.
///
/// Every method either fills its whole target or fails with
/// [`io::ErrorKind::UnexpectedEof`].
pub trait ReadExt: Read {
    /// Read a structure from the stream.
    fn read_struct<T: FromBytes>(&mut self) -> io::Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_fixed(size)?;
        T::read_from_bytes(&bytes)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "structure size mismatch"))
    }

    /// Read exactly `count` bytes.
    ///
    /// The buffer grows with the bytes actually read; `count` is never
    /// reserved up front.
    fn read_fixed(&mut self, count: usize) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        Read::take(&mut *self, count as u64).read_to_end(&mut bytes)?;
        if bytes.len() != count {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {count} bytes, got {}", bytes.len()),
            ));
        }
        Ok(bytes)
    }
}

impl<R: Read + ?Sized> ReadExt for R {}

/// Fixed-size writes to a stream.
pub trait WriteExt: Write {
    /// Write the raw bytes of a structure.
    fn write_struct<T: IntoBytes + Immutable>(&mut self, value: &T) -> io::Result<()> {
        self.write_all(value.as_bytes())
    }
}

impl<W: Write + ?Sized> WriteExt for W {}
