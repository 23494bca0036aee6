//! Item extraction.
//!
//! Each item is copied verbatim from its absolute position in the archive to
//! `out_dir/<name>`. Extraction is not transactional: a failure leaves the
//! items written so far on disk.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use wadtex_common::ReadExt;

use crate::{Error, Result, WadItemHeader};

/// Progress report for one extracted item.
#[derive(Debug, Clone, Copy)]
pub struct ExtractProgress<'a> {
    /// 1-based position of the item in the directory.
    pub index: usize,
    /// Number of items being extracted.
    pub total: usize,
    /// Item name as stored in the directory.
    pub name: &'a str,
    /// Where the payload was written.
    pub path: &'a Path,
    /// Bytes written.
    pub size: usize,
}

/// Join `out_dir` with an item name.
///
/// Both `/` and `\` separate directories inside a name. Names that are empty
/// or would leave `out_dir` (`..`, absolute paths, drive prefixes) are
/// rejected.
pub fn item_output_path(out_dir: &Path, name: &str) -> Result<PathBuf> {
    let normalized = name.replace('\\', "/");
    let mut path = out_dir.to_path_buf();
    let mut depth = 0usize;

    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => {
                path.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::UnsafeItemName(name.to_string()));
            }
        }
    }

    if depth == 0 {
        return Err(Error::UnsafeItemName(name.to_string()));
    }
    Ok(path)
}

/// Read the payload of one item.
///
/// Exactly `item.size()` bytes are read from `item.position()`; running out
/// of file first is an I/O error.
pub fn read_item<R: Read + Seek + ?Sized>(reader: &mut R, item: &WadItemHeader) -> Result<Vec<u8>> {
    let position = u64::try_from(item.position()).map_err(|_| Error::InvalidItemField {
        name: item.name().into_owned(),
        field: "position",
        value: item.position(),
    })?;
    let size = usize::try_from(item.size()).map_err(|_| Error::InvalidItemField {
        name: item.name().into_owned(),
        field: "size",
        value: item.size(),
    })?;

    reader.seek(SeekFrom::Start(position))?;
    Ok(reader.read_fixed(size)?)
}

/// Extract every item, in directory order, below `out_dir`.
///
/// Parent directories are created as needed. `progress` is called after each
/// item is written. Returns the number of items extracted.
pub fn extract<R, F>(reader: &mut R, items: &[WadItemHeader], out_dir: &Path, mut progress: F) -> Result<usize>
where
    R: Read + Seek + ?Sized,
    F: FnMut(&ExtractProgress<'_>),
{
    let total = items.len();
    info!(total, out_dir = %out_dir.display(), "extracting items");

    for (i, item) in items.iter().enumerate() {
        let name = item.name();
        let path = item_output_path(out_dir, &name)?;
        let data = read_item(reader, item)?;
        write_item(&path, &data)?;

        progress(&ExtractProgress {
            index: i + 1,
            total,
            name: &name,
            path: &path,
            size: data.len(),
        });
    }

    Ok(total)
}

/// Extract every item using the rayon thread pool.
///
/// Each worker opens its own handle on `wad_path`. Progress calls are
/// serialized but arrive in completion order; use
/// [`ExtractProgress::index`] to tell items apart.
#[cfg(feature = "parallel")]
pub fn extract_parallel<F>(wad_path: &Path, items: &[WadItemHeader], out_dir: &Path, progress: F) -> Result<usize>
where
    F: FnMut(&ExtractProgress<'_>) + Send,
{
    use std::fs::File;

    use parking_lot::Mutex;
    use rayon::prelude::*;

    let total = items.len();
    info!(total, out_dir = %out_dir.display(), "extracting items in parallel");

    let progress = Mutex::new(progress);

    items.par_iter().enumerate().try_for_each_init(
        || File::open(wad_path),
        |file, (i, item)| -> Result<()> {
            let file = file
                .as_mut()
                .map_err(|e| Error::Io(std::io::Error::new(e.kind(), e.to_string())))?;

            let name = item.name();
            let path = item_output_path(out_dir, &name)?;
            let data = read_item(file, item)?;
            write_item(&path, &data)?;

            let mut callback = progress.lock();
            (*callback)(&ExtractProgress {
                index: i + 1,
                total,
                name: &name,
                path: &path,
                size: data.len(),
            });
            Ok(())
        },
    )?;

    Ok(total)
}

fn write_item(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;
    debug!(path = %path.display(), size = data.len(), "extracted item");
    Ok(())
}
