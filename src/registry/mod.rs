//! Item registry - the data the browser operates over
//!
//! A registry snapshot is the flat, ordered set of file items plus the
//! folder tree for one view. It is owned by the host and read-mostly by the
//! interaction engine: the engine never mutates it, and all mutations it
//! derives (selection, sort, drag session) live in engine state instead.
//!
//! - `item`: core data types (Item, ItemKind, kind-specific metadata)
//! - `snapshot`: the Registry collection, id index and JSON (de)serialization
//! - `scan`: filesystem walker that builds a snapshot from a real directory

pub mod item;
pub mod scan;
pub mod snapshot;

pub use item::{FileMeta, FolderMeta, Item, ItemKind, ItemMetadata};
pub use scan::scan_directory;
pub use snapshot::{Registry, RegistryError};
