//! Item data model
//!
//! These are pure data structures with minimal logic. An item is a file or a
//! folder; the kind-specific fields live in an enum variant so the two cannot
//! be confused. Direct field access is used for comparisons and filtering
//! (idiomatic Rust style).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Universal domain entity representing a file or a folder in one view
///
/// The id is opaque and must be unique across the combined universe of files
/// and folders in a single view: selection and drag-and-drop operate over a
/// shared id-space. Ids stay stable across renders and moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (path string for filesystem-backed views)
    pub id: String,

    /// Display name (file or folder name)
    pub name: String,

    /// Id of the containing folder, `None` for root-level items
    #[serde(default)]
    pub parent_id: Option<String>,

    /// Non-selectable marker; locked items never enter the selection and
    /// are skipped inside range spans
    #[serde(default)]
    pub locked: bool,

    /// Kind-specific metadata
    pub metadata: ItemMetadata,
}

/// Kind of an item, used where only the discriminant matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

/// Kind-specific metadata for files or folders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemMetadata {
    /// File entity with upload metadata
    File(FileMeta),

    /// Folder entity; nested folders are referenced by id
    Folder(FolderMeta),
}

/// Metadata for file entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// File size in bytes
    #[serde(default)]
    pub size: u64,

    /// MIME type (if known)
    #[serde(default)]
    pub mime_type: Option<String>,

    /// Identity string of whoever uploaded the file
    #[serde(default)]
    pub uploaded_by: Option<String>,

    /// Upload instant; items without one sort last under date ordering
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,

    /// Opaque thumbnail reference for the host to resolve
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Metadata for folder entities
///
/// The tree is folder-of-folders: `children` holds nested folder ids in
/// display order. Files reference their parent via `parent_id` and are not
/// embedded in the folder node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMeta {
    #[serde(default)]
    pub children: Vec<String>,
}

impl Item {
    /// Create a file item
    #[must_use]
    pub fn file(id: impl Into<String>, name: impl Into<String>, parent_id: Option<String>, meta: FileMeta) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            locked: false,
            metadata: ItemMetadata::File(meta),
        }
    }

    /// Create a folder item
    #[must_use]
    pub fn folder(
        id: impl Into<String>,
        name: impl Into<String>,
        parent_id: Option<String>,
        children: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            locked: false,
            metadata: ItemMetadata::Folder(FolderMeta { children }),
        }
    }

    /// Kind discriminant of this item
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self.metadata {
            ItemMetadata::File(_) => ItemKind::File,
            ItemMetadata::Folder(_) => ItemKind::Folder,
        }
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self.metadata, ItemMetadata::Folder(_))
    }

    /// Nested folder ids; empty slice for files
    #[must_use]
    pub fn child_ids(&self) -> &[String] {
        match &self.metadata {
            ItemMetadata::Folder(FolderMeta { children }) => children,
            ItemMetadata::File(_) => &[],
        }
    }

    /// File metadata if this is a file item
    #[must_use]
    pub const fn as_file(&self) -> Option<&FileMeta> {
        match &self.metadata {
            ItemMetadata::File(meta) => Some(meta),
            ItemMetadata::Folder(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_item_creation() {
        let item = Item::file(
            "f1",
            "report.pdf",
            Some("docs".into()),
            FileMeta {
                size: 2048,
                mime_type: Some("application/pdf".into()),
                ..Default::default()
            },
        );

        assert_eq!(item.kind(), ItemKind::File);
        assert!(!item.is_folder());
        assert!(item.child_ids().is_empty());
        assert_eq!(item.as_file().unwrap().size, 2048);
    }

    #[test]
    fn test_folder_item_creation() {
        let item = Item::folder("docs", "docs", None, vec!["reports".into()]);

        assert_eq!(item.kind(), ItemKind::Folder);
        assert!(item.is_folder());
        assert_eq!(item.child_ids(), &["reports".to_string()]);
        assert!(item.as_file().is_none());
    }

    #[test]
    fn test_item_snapshot_roundtrip() {
        let item = Item::folder("a", "a", None, vec!["b".into()]);
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}
