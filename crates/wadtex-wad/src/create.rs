//! Archive creation.

use std::path::Path;

use crate::{Error, Result};

/// Pack a directory into a WAD archive.
///
/// Not available: always returns [`Error::Unimplemented`] without touching
/// either path.
pub fn create<P: AsRef<Path>, Q: AsRef<Path>>(_input_dir: P, _output: Q) -> Result<()> {
    Err(Error::Unimplemented("WAD creation"))
}
