//! Testing utilities for browsr
//!
//! This module provides fixture builders for writing tests against the
//! interaction engine without repeating registry setup in every module.
//!
//! Only available when compiled with `cfg(test)`.

use chrono::{TimeZone, Utc};

use crate::registry::{FileMeta, Item, Registry};

/// A file item with just a size, parented if given
#[must_use]
pub fn sized_file(id: &str, name: &str, parent: Option<&str>, size: u64) -> Item {
    Item::file(
        id,
        name,
        parent.map(String::from),
        FileMeta { size, ..Default::default() },
    )
}

/// A file item with full listing metadata
#[must_use]
pub fn listed_file(id: &str, name: &str, size: u64, uploader: &str, day: u32) -> Item {
    Item::file(
        id,
        name,
        None,
        FileMeta {
            size,
            mime_type: None,
            uploaded_by: Some(uploader.to_string()),
            uploaded_at: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).single(),
            thumbnail: None,
        },
    )
}

/// The standard small fixture: one folder with a file inside, two root files
///
/// Ids are `docs`, `f1`, `f2` and `in_docs`.
///
/// # Panics
/// Panics if the fixture fails registry validation, which would be a bug in
/// the fixture itself.
#[must_use]
pub fn sample_registry() -> Registry {
    Registry::new(vec![
        Item::folder("docs", "docs", None, vec!["in_docs".into()]),
        Item::file("f1", "f1.txt", None, FileMeta::default()),
        Item::file("f2", "f2.txt", None, FileMeta::default()),
        Item::file("in_docs", "note.md", Some("docs".into()), FileMeta::default()),
    ])
    .unwrap()
}

/// Fixture with a nested folder chain and a locked file at the root
///
/// Tree: `a/` contains `b/` contains `deep.txt`; root also holds
/// `plain.txt` and the locked `frozen.txt`.
///
/// # Panics
/// Panics if the fixture fails registry validation.
#[must_use]
pub fn nested_registry() -> Registry {
    let mut frozen = sized_file("frozen", "frozen.txt", None, 10);
    frozen.locked = true;

    Registry::new(vec![
        Item::folder("a", "a", None, vec!["b".into()]),
        Item::folder("b", "b", Some("a".into()), vec!["deep".into()]),
        sized_file("deep", "deep.txt", Some("b"), 5),
        sized_file("plain", "plain.txt", None, 20),
        frozen,
    ])
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::is_descendant;
    use crate::registry::ItemKind;

    #[test]
    fn test_sample_registry_shape() {
        let reg = sample_registry();
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.kind_of("docs"), Some(ItemKind::Folder));
        assert_eq!(reg.children_of(Some("docs")).len(), 1);
        assert_eq!(reg.children_of(None).len(), 3);
    }

    #[test]
    fn test_nested_registry_shape() {
        let reg = nested_registry();
        assert!(is_descendant("deep", "a", &reg));
        assert!(reg.get("frozen").is_some_and(|item| item.locked));
    }

    #[test]
    fn test_listed_file_carries_metadata() {
        let file = listed_file("r", "r.pdf", 42, "ana", 7);
        let meta = file.as_file().unwrap();
        assert_eq!(meta.size, 42);
        assert_eq!(meta.uploaded_by.as_deref(), Some("ana"));
        assert!(meta.uploaded_at.is_some());
    }
}
