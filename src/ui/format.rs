//! Cell formatting for the listing table

use byte_unit::{Byte, UnitType};
use chrono::{DateTime, Utc};

use crate::registry::Item;

/// Human-readable size, `-` for folders
#[must_use]
pub fn size_cell(item: &Item) -> String {
    match item.as_file() {
        Some(meta) => format_size(meta.size),
        None => "-".to_string(),
    }
}

#[must_use]
pub fn format_size(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Decimal);
    format!("{adjusted:.1}")
}

/// Upload instant, `-` when absent
#[must_use]
pub fn date_cell(item: &Item) -> String {
    item.as_file()
        .and_then(|meta| meta.uploaded_at)
        .map_or_else(|| "-".to_string(), |at| format_date(at))
}

#[must_use]
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Uploader identity, `-` when absent
#[must_use]
pub fn uploader_cell(item: &Item) -> String {
    item.as_file()
        .and_then(|meta| meta.uploaded_by.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Display name; folders get a trailing slash like `ls -p`
#[must_use]
pub fn name_cell(item: &Item) -> String {
    if item.is_folder() {
        format!("{}/", item.name)
    } else {
        item.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FileMeta;
    use chrono::TimeZone;

    #[test]
    fn test_name_cell_marks_folders() {
        let folder = Item::folder("d", "docs", None, vec![]);
        let file = Item::file("f", "a.txt", None, FileMeta::default());
        assert_eq!(name_cell(&folder), "docs/");
        assert_eq!(name_cell(&file), "a.txt");
    }

    #[test]
    fn test_folder_cells_are_dashes() {
        let folder = Item::folder("d", "docs", None, vec![]);
        assert_eq!(size_cell(&folder), "-");
        assert_eq!(date_cell(&folder), "-");
        assert_eq!(uploader_cell(&folder), "-");
    }

    #[test]
    fn test_date_cell_formats_instant() {
        let at = Utc.with_ymd_and_hms(2026, 8, 30, 9, 15, 0).unwrap();
        let file = Item::file(
            "f",
            "a.txt",
            None,
            FileMeta { uploaded_at: Some(at), ..Default::default() },
        );
        assert_eq!(date_cell(&file), "2026-08-30 09:15");
    }
}
