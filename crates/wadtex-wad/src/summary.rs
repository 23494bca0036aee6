//! Directory reports: per-type counts and name listings.

use std::collections::BTreeMap;

use crate::{WadItemHeader, WadItemType};

/// Number of items sharing one type byte.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeCount {
    pub type_byte: u8,
    pub type_name: &'static str,
    pub count: usize,
}

/// Overview of a WAD archive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WadSummary {
    /// Number of directory records.
    pub item_count: usize,
    /// Size of the archive file in bytes.
    pub archive_size: u64,
    /// Counts grouped by type byte, in ascending byte order.
    pub type_counts: Vec<TypeCount>,
}

/// Tally items by type byte.
pub fn summarize(items: &[WadItemHeader], archive_size: u64) -> WadSummary {
    let mut counts = BTreeMap::<u8, usize>::new();
    for item in items {
        *counts.entry(item.type_byte()).or_default() += 1;
    }

    let type_counts = counts
        .into_iter()
        .map(|(type_byte, count)| TypeCount {
            type_byte,
            type_name: WadItemType::from_byte(type_byte).name(),
            count,
        })
        .collect();

    WadSummary {
        item_count: items.len(),
        archive_size,
        type_counts,
    }
}

/// Item names in directory order.
pub fn list_names(items: &[WadItemHeader]) -> Vec<String> {
    items.iter().map(|item| item.name().into_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, type_byte: u8) -> WadItemHeader {
        WadItemHeader::new(0, 0, type_byte, name).unwrap()
    }

    #[test]
    fn test_summary_groups_by_type_byte() {
        let items = [
            item("a", 68),
            item("b", 64),
            item("c", 68),
            item("d", 0xF0),
            item("e", 0xF1),
        ];

        let summary = summarize(&items, 4096);

        assert_eq!(summary.item_count, 5);
        assert_eq!(summary.archive_size, 4096);
        let rows: Vec<_> = summary
            .type_counts
            .iter()
            .map(|c| (c.type_byte, c.type_name, c.count))
            .collect();
        assert_eq!(
            rows,
            [
                (64, "Palette", 1),
                (68, "MipTex", 2),
                (0xF0, "Unknown", 1),
                (0xF1, "Unknown", 1),
            ]
        );
    }

    #[test]
    fn test_list_names_keeps_order() {
        let items = [item("zeta", 1), item("alpha", 1), item("mid", 1)];
        assert_eq!(list_names(&items), ["zeta", "alpha", "mid"]);
    }
}
