//! WAD container reader.
//!
//! A WAD file bundles named, typed binary items behind a small header and an
//! offset-addressed directory:
//!
//! - a 12-byte [`WadHeader`] (`"WAD2"` magic, item count, directory offset)
//! - item payloads, anywhere in the file
//! - the directory: `items_count` fixed-size [`WadItemHeader`] records
//!
//! Every item is addressed by an absolute position and size, so items can be
//! read in any order.
//!
//! # Example
//!
//! ```no_run
//! use wadtex_wad::WadArchive;
//!
//! let mut archive = WadArchive::open("gfx.wad")?;
//!
//! for item in archive.items() {
//!     println!("{}: {} ({} bytes)", item.name(), item.item_type(), item.size());
//! }
//!
//! archive.extract("out", |p| println!("{}/{} {}", p.index, p.total, p.name))?;
//! # Ok::<(), wadtex_wad::Error>(())
//! ```

mod archive;
mod create;
mod directory;
mod error;
mod extract;
mod header;
mod item;
mod summary;

#[cfg(test)]
pub(crate) mod testing;

pub use archive::WadArchive;
pub use create::create;
pub use directory::{load_items_header, WadItemsHeader};
pub use error::{Error, Result};
#[cfg(feature = "parallel")]
pub use extract::extract_parallel;
pub use extract::{extract, item_output_path, read_item, ExtractProgress};
pub use header::{WadHeader, MAGIC};
pub use item::{type_name, WadItemHeader, WadItemType};
pub use summary::{list_names, summarize, TypeCount, WadSummary};
