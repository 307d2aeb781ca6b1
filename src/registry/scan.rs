//! Filesystem snapshot builder
//!
//! Builds a [`Registry`] from a real directory tree so the TUI host has
//! something to browse without hand-writing snapshot files. Ids are the
//! path strings, which keeps them unique and stable across renders.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use super::item::{FileMeta, Item};
use super::snapshot::{Registry, RegistryError};

/// Scan a directory into a registry snapshot
///
/// Entries are visited depth-first with names sorted per directory, so the
/// registry order is deterministic. Symlinks are skipped; the registry
/// invariant forbids cycles and following links is the easy way to get one.
///
/// # Errors
///
/// Returns an error if the root cannot be read. Unreadable entries below
/// the root are skipped rather than failing the whole scan.
pub fn scan_directory(root: impl AsRef<Path>) -> Result<Registry, RegistryError> {
    let root = root.as_ref();
    let mut items = Vec::new();
    scan_into(root, None, &mut items)?;
    Registry::new(items)
}

fn scan_into(dir: &Path, parent_id: Option<&str>, items: &mut Vec<Item>) -> Result<(), RegistryError> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.filter_map(Result::ok).collect();
    entries.sort_by_key(std::fs::DirEntry::file_name);

    // Two passes so every folder item exists before its children list is
    // filled in, keeping child ids in the same order as the listing.
    let mut child_folders = Vec::new();

    for entry in &entries {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_symlink() {
            continue;
        }

        let path = entry.path();
        let id = path.display().to_string();
        let name = entry.file_name().to_string_lossy().into_owned();

        if file_type.is_dir() {
            items.push(Item::folder(
                id.clone(),
                name,
                parent_id.map(str::to_string),
                Vec::new(),
            ));
            child_folders.push((items.len() - 1, path));
        } else {
            items.push(Item::file(
                id,
                name,
                parent_id.map(str::to_string),
                file_meta(&path),
            ));
        }
    }

    for (pos, path) in child_folders {
        let folder_id = items[pos].id.clone();
        let before = items.len();
        scan_into(&path, Some(&folder_id), items)?;

        let nested: Vec<String> = items[before..]
            .iter()
            .filter(|item| item.is_folder() && item.parent_id.as_deref() == Some(folder_id.as_str()))
            .map(|item| item.id.clone())
            .collect();
        if let Item {
            metadata: super::item::ItemMetadata::Folder(meta),
            ..
        } = &mut items[pos]
        {
            meta.children = nested;
        }
    }

    Ok(())
}

fn file_meta(path: &Path) -> FileMeta {
    let metadata = fs::metadata(path).ok();
    let size = metadata.as_ref().map_or(0, std::fs::Metadata::len);
    let uploaded_at = metadata
        .as_ref()
        .and_then(|m| m.modified().ok())
        .map(system_time_to_utc);

    FileMeta {
        size,
        mime_type: detect_mime_type(path),
        uploaded_by: None,
        uploaded_at,
        thumbnail: None,
    }
}

fn system_time_to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

/// Simple extension-based detection
fn detect_mime_type(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| match ext.to_lowercase().as_str() {
            "txt" => Some("text/plain"),
            "rs" => Some("text/x-rust"),
            "md" => Some("text/markdown"),
            "json" => Some("application/json"),
            "toml" => Some("application/toml"),
            "yaml" | "yml" => Some("application/yaml"),
            "pdf" => Some("application/pdf"),
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            "svg" => Some("image/svg+xml"),
            _ => None,
        })
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_scan_builds_tree() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let mut f = fs::File::create(dir.path().join("a.txt")).unwrap();
        f.write_all(b"hello").unwrap();
        fs::File::create(sub.join("nested.md")).unwrap();

        let reg = scan_directory(dir.path()).unwrap();

        let sub_id = sub.display().to_string();
        let folder = reg.get(&sub_id).unwrap();
        assert!(folder.is_folder());
        assert!(folder.parent_id.is_none());

        let file = reg
            .get(&dir.path().join("a.txt").display().to_string())
            .unwrap();
        let meta = file.as_file().unwrap();
        assert_eq!(meta.size, 5);
        assert_eq!(meta.mime_type.as_deref(), Some("text/plain"));
        assert!(meta.uploaded_at.is_some());

        let nested = reg
            .get(&sub.join("nested.md").display().to_string())
            .unwrap();
        assert_eq!(nested.parent_id.as_deref(), Some(sub_id.as_str()));
    }

    #[test]
    fn test_scan_child_folder_ids_recorded() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("a").join("inner")).unwrap();

        let reg = scan_directory(dir.path()).unwrap();

        let a = reg.get(&dir.path().join("a").display().to_string()).unwrap();
        assert_eq!(
            a.child_ids(),
            &[dir.path().join("a").join("inner").display().to_string()]
        );

        let b = reg.get(&dir.path().join("b").display().to_string()).unwrap();
        assert!(b.child_ids().is_empty());
    }

    #[test]
    fn test_mime_type_detection() {
        let test_cases = vec![
            (Path::new("test.rs"), Some("text/x-rust")),
            (Path::new("test.txt"), Some("text/plain")),
            (Path::new("test.json"), Some("application/json")),
            (Path::new("test.unknown"), None),
        ];

        for (path, expected) in test_cases {
            assert_eq!(detect_mime_type(path).as_deref(), expected, "Failed for {path:?}");
        }
    }
}
