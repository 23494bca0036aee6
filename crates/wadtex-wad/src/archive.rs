//! WAD archive reader.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::extract::{extract, read_item, ExtractProgress};
use crate::summary::{list_names, summarize, WadSummary};
use crate::{load_items_header, Result, WadHeader, WadItemHeader, WadItemsHeader};

/// An open WAD archive with its verified header and directory.
///
/// The file handle is held for the lifetime of the archive and closed when
/// it is dropped.
#[derive(Debug)]
pub struct WadArchive {
    path: PathBuf,
    reader: BufReader<File>,
    header: WadHeader,
    items: WadItemsHeader,
    size: u64,
}

impl WadArchive {
    /// Open a WAD file, verify its header and load the item directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let header = WadHeader::load(&mut reader)?;
        header.verify()?;
        let items = load_items_header(&mut reader, &header)?;

        info!(path = %path.display(), items = items.len(), size, "opened WAD archive");

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            header,
            items,
            size,
        })
    }

    /// Path the archive was opened from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn header(&self) -> &WadHeader {
        &self.header
    }

    /// Directory records in on-disk order.
    #[inline]
    pub fn items(&self) -> &[WadItemHeader] {
        &self.items
    }

    /// Number of items.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Size of the archive file in bytes.
    #[inline]
    pub fn size_on_disk(&self) -> u64 {
        self.size
    }

    /// Find an item by exact name.
    pub fn find(&self, name: &str) -> Option<&WadItemHeader> {
        self.items.iter().find(|item| item.name_bytes() == name.as_bytes())
    }

    /// Read the payload of one item.
    pub fn read(&mut self, item: &WadItemHeader) -> Result<Vec<u8>> {
        read_item(&mut self.reader, item)
    }

    /// Per-type counts, total item count and archive size.
    pub fn summary(&self) -> WadSummary {
        summarize(&self.items, self.size)
    }

    /// Item names in directory order.
    pub fn names(&self) -> Vec<String> {
        list_names(&self.items)
    }

    /// Extract every item below `out_dir`. See [`extract`].
    pub fn extract<P, F>(&mut self, out_dir: P, progress: F) -> Result<usize>
    where
        P: AsRef<Path>,
        F: FnMut(&ExtractProgress<'_>),
    {
        extract(&mut self.reader, &self.items, out_dir.as_ref(), progress)
    }

    /// Extract a subset of items, e.g. a filtered copy of [`WadArchive::items`].
    pub fn extract_items<P, F>(&mut self, items: &[WadItemHeader], out_dir: P, progress: F) -> Result<usize>
    where
        P: AsRef<Path>,
        F: FnMut(&ExtractProgress<'_>),
    {
        extract(&mut self.reader, items, out_dir.as_ref(), progress)
    }
}
