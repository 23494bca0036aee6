//! Fixed-width, null-terminated name fields.

use std::borrow::Cow;

use crate::{Error, Result};

/// Bytes of a fixed-width field up to (not including) the first null.
///
/// A field without a terminator is taken whole.
#[inline]
pub fn cstr_field(bytes: &[u8]) -> &[u8] {
    let end = memchr::memchr(0, bytes).unwrap_or(bytes.len());
    &bytes[..end]
}

/// Decode a fixed-width field as text, replacing invalid UTF-8.
pub fn lossy_cstr_field(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(cstr_field(bytes))
}

/// Encode `name` into a zero-padded field of `N` bytes.
///
/// At least one terminating null must fit, so names of `N` bytes or longer
/// are rejected.
pub fn encode_cstr_field<const N: usize>(name: &str) -> Result<[u8; N]> {
    let bytes = name.as_bytes();
    if bytes.len() >= N {
        return Err(Error::FieldTooLong {
            name: name.to_string(),
            width: N,
        });
    }

    let mut field = [0u8; N];
    field[..bytes.len()].copy_from_slice(bytes);
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cstr_field_stops_at_null() {
        assert_eq!(cstr_field(b"abc\0def\0"), b"abc");
        assert_eq!(cstr_field(b"\0abc"), b"");
    }

    #[test]
    fn test_cstr_field_without_terminator() {
        assert_eq!(cstr_field(b"abcd"), b"abcd");
    }

    #[test]
    fn test_encode_pads_with_zeros() {
        let field: [u8; 8] = encode_cstr_field("wall").unwrap();
        assert_eq!(&field, b"wall\0\0\0\0");
    }

    #[test]
    fn test_encode_rejects_long_name() {
        assert!(matches!(
            encode_cstr_field::<4>("wall"),
            Err(Error::FieldTooLong { width: 4, .. })
        ));
    }
}
