//! Selection engine
//!
//! Computes the next selection set for a click gesture as a pure function of
//! (current set, ordered item list, click target, anchor, modifiers). The
//! rules are the conventional file-manager ones:
//!
//! 1. Toggle modifier: add/remove the clicked item, move the anchor to it.
//! 2. Range modifier with an anchor: select the inclusive span between
//!    anchor and click, union'd with the current selection. The anchor does
//!    not move, so repeated range-clicks extend from the original anchor.
//! 3. Plain click: collapse to the clicked item and re-anchor.
//!
//! Unknown ids and locked items are no-ops; the caller gets its inputs back
//! unchanged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::registry::{Item, ItemKind, Registry};

/// Normalized modifier flags for a click gesture
///
/// Hosts map their platform's modifier keys (ctrl/cmd, shift) onto these
/// before the gesture reaches the engine, so the engine never depends on a
/// specific event system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Platform multi-select key (ctrl/cmd): toggle membership
    pub toggle: bool,
    /// Shift: range selection from the anchor
    pub range: bool,
}

/// The set of currently selected item ids, split by kind
///
/// Files and folders are selectable independently and bulk actions differ by
/// kind, so the two halves are kept apart. The sets are rebuilt wholesale on
/// every transition; consumers never observe partial mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    pub files: BTreeSet<String>,
    pub folders: BTreeSet<String>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection containing exactly one item
    #[must_use]
    pub fn singleton(id: impl Into<String>, kind: ItemKind) -> Self {
        let mut set = Self::new();
        set.insert(id.into(), kind);
        set
    }

    pub fn insert(&mut self, id: String, kind: ItemKind) {
        match kind {
            ItemKind::File => self.files.insert(id),
            ItemKind::Folder => self.folders.insert(id),
        };
    }

    /// Remove an id from whichever half holds it, reporting whether it was
    /// present
    pub fn remove(&mut self, id: &str) -> bool {
        self.files.remove(id) || self.folders.remove(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.files.contains(id) || self.folders.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.folders.clear();
    }

    /// Drop ids that no longer exist in the registry (or whose kind changed)
    ///
    /// Stale ids appear when the host mutates the backing store between
    /// snapshots; pruning them is policy, not an error. Returns whether
    /// anything was removed.
    pub fn prune(&mut self, registry: &Registry) -> bool {
        let before = self.len();
        self.files
            .retain(|id| registry.kind_of(id) == Some(ItemKind::File));
        self.folders
            .retain(|id| registry.kind_of(id) == Some(ItemKind::Folder));
        self.len() != before
    }
}

/// Compute the next selection for a click
///
/// `ordered` is the visible projection in display order; range spans are
/// computed over it. Returns the next selection and the next anchor. A click
/// on an id not present in `ordered` (or a locked item) returns the inputs
/// unchanged.
#[must_use]
pub fn compute_selection(
    current: &SelectionSet,
    ordered: &[&Item],
    clicked_id: &str,
    modifiers: Modifiers,
    anchor: Option<&str>,
) -> (SelectionSet, Option<String>) {
    let unchanged = || (current.clone(), anchor.map(str::to_string));

    let Some(clicked_pos) = ordered.iter().position(|item| item.id == clicked_id) else {
        return unchanged();
    };
    let clicked = ordered[clicked_pos];
    if clicked.locked {
        return unchanged();
    }

    if modifiers.toggle {
        let mut next = current.clone();
        if !next.remove(clicked_id) {
            next.insert(clicked.id.clone(), clicked.kind());
        }
        return (next, Some(clicked.id.clone()));
    }

    if modifiers.range
        && let Some(anchor_id) = anchor
        && let Some(anchor_pos) = ordered.iter().position(|item| item.id == anchor_id)
    {
        let (lo, hi) = if anchor_pos <= clicked_pos {
            (anchor_pos, clicked_pos)
        } else {
            (clicked_pos, anchor_pos)
        };
        let mut next = current.clone();
        for item in &ordered[lo..=hi] {
            if !item.locked {
                next.insert(item.id.clone(), item.kind());
            }
        }
        // Anchor survives so the next range click extends from the same spot.
        return (next, Some(anchor_id.to_string()));
    }

    (
        SelectionSet::singleton(clicked.id.clone(), clicked.kind()),
        Some(clicked.id.clone()),
    )
}
