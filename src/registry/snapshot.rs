//! Registry snapshots
//!
//! A [`Registry`] is the flat, ordered collection of items visible to one
//! browser view: files plus the folder tree, indexed by id. It is pure data
//! supplied fresh by the host on every render; the interaction engine reads
//! it and never mutates it.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use super::item::{Item, ItemKind};

/// Registry error type
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two items share an id; selection and drag-and-drop require a shared,
    /// unique id-space across files and folders
    #[error("duplicate item id: {0}")]
    DuplicateId(String),

    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered item collection with id lookup
///
/// Registry order is insertion order and doubles as the unsorted display
/// order (the sort engine works on a projection, never on the registry).
#[derive(Debug, Clone, Default)]
pub struct Registry {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry from items, validating id uniqueness
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] if two items share an id.
    pub fn new(items: Vec<Item>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(RegistryError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items, index })
    }

    /// Load a registry from a snapshot JSON file (an array of items)
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or contains
    /// duplicate ids.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path)?;
        let items: Vec<Item> = serde_json::from_str(&raw)?;
        Self::new(items)
    }

    /// Serialize the registry back to snapshot JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    /// Look up an item by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Kind of the item with the given id, if present
    #[must_use]
    pub fn kind_of(&self, id: &str) -> Option<ItemKind> {
        self.get(id).map(Item::kind)
    }

    /// All items in registry order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items directly contained in `folder` (`None` for the root level),
    /// in registry order
    #[must_use]
    pub fn children_of(&self, folder: Option<&str>) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.parent_id.as_deref() == folder)
            .collect()
    }
}
