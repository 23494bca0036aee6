//! Item directory loading.

use std::io::{Read, Seek, SeekFrom};

use tracing::debug;
use wadtex_common::ReadExt;

use crate::{Error, Result, WadHeader, WadItemHeader};

/// All directory records of one WAD file, in on-disk order.
pub type WadItemsHeader = Vec<WadItemHeader>;

/// Seek to the directory named by `header` and read every record.
///
/// Records are returned in on-disk order and their type bytes are kept as
/// stored. A directory cut short by the end of the file is an I/O error.
pub fn load_items_header<R: Read + Seek + ?Sized>(
    reader: &mut R,
    header: &WadHeader,
) -> Result<WadItemsHeader> {
    let count = usize::try_from(header.items_count())
        .map_err(|_| Error::InvalidItemCount(header.items_count()))?;
    let offset = u64::try_from(header.offset())
        .map_err(|_| Error::InvalidDirectoryOffset(header.offset()))?;

    debug!(offset, count, "reading item directory");
    reader.seek(SeekFrom::Start(offset))?;

    // `count` is untrusted; grow with the records actually present.
    let mut items = Vec::new();
    for _ in 0..count {
        items.push(reader.read_struct::<WadItemHeader>()?);
    }

    Ok(items)
}
