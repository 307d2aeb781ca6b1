//! Context menu router
//!
//! Decides, per right-click, which item set an action applies to and whether
//! an externally supplied handler or the built-in menu receives the event.
//! The acting-set rule is explicit rather than inferred at call sites:
//! right-clicking inside a multi-selection acts on the full same-kind
//! selection; right-clicking anything else collapses the selection to that
//! item and acts on it alone.

use serde::{Deserialize, Serialize};

use crate::engine::events::Position;
use crate::engine::selection::SelectionSet;
use crate::registry::ItemKind;

/// Actions the built-in menu can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    Download,
    Open,
    Rename,
    Delete,
}

impl MenuAction {
    /// Menu entry label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Download => "Download",
            Self::Open => "Open",
            Self::Rename => "Rename",
            Self::Delete => "Delete",
        }
    }
}

/// Which action handlers the host supplied for one kind
///
/// An absent handler removes the entry from the built-in menu entirely; it
/// is never shown disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppliedHandlers {
    #[serde(default)]
    pub download: bool,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub rename: bool,
    #[serde(default)]
    pub delete: bool,
}

/// Host-side menu configuration for both kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Route file right-clicks to an external handler instead of the
    /// built-in menu
    #[serde(default)]
    pub external_file_menu: bool,
    #[serde(default)]
    pub external_folder_menu: bool,

    #[serde(default)]
    pub file_handlers: SuppliedHandlers,
    #[serde(default)]
    pub folder_handlers: SuppliedHandlers,
}

impl MenuConfig {
    const fn handlers(&self, kind: ItemKind) -> SuppliedHandlers {
        match kind {
            ItemKind::File => self.file_handlers,
            ItemKind::Folder => self.folder_handlers,
        }
    }

    #[must_use]
    pub const fn external(&self, kind: ItemKind) -> bool {
        match kind {
            ItemKind::File => self.external_file_menu,
            ItemKind::Folder => self.external_folder_menu,
        }
    }
}

/// Resolved right-click target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTarget {
    /// Ids the menu action will apply to, all of one kind
    pub acting_ids: Vec<String>,
    /// Whether the selection must collapse to the clicked item
    pub collapse_selection: bool,
}

/// Resolve the acting item set for a right-click
///
/// If the clicked item is already selected and the selection holds more than
/// one member, the full same-kind selection acts (bulk action, never a mix
/// of files and folders). Otherwise the clicked item acts alone and the
/// selection collapses to it.
#[must_use]
pub fn resolve_menu_target(clicked_id: &str, kind: ItemKind, selection: &SelectionSet) -> MenuTarget {
    if selection.contains(clicked_id) && selection.len() > 1 {
        let same_kind = match kind {
            ItemKind::File => &selection.files,
            ItemKind::Folder => &selection.folders,
        };
        return MenuTarget {
            acting_ids: same_kind.iter().cloned().collect(),
            collapse_selection: false,
        };
    }

    MenuTarget {
        acting_ids: vec![clicked_id.to_string()],
        collapse_selection: true,
    }
}

/// Entries of the built-in menu for one kind, filtered to supplied handlers
#[must_use]
pub fn builtin_entries(kind: ItemKind, config: &MenuConfig) -> Vec<MenuAction> {
    let handlers = config.handlers(kind);
    let order: &[MenuAction] = match kind {
        ItemKind::File => &[MenuAction::Download, MenuAction::Rename, MenuAction::Delete],
        ItemKind::Folder => &[MenuAction::Open, MenuAction::Rename, MenuAction::Delete],
    };

    order
        .iter()
        .copied()
        .filter(|action| match action {
            MenuAction::Download => handlers.download,
            MenuAction::Open => handlers.open,
            MenuAction::Rename => handlers.rename,
            MenuAction::Delete => handlers.delete,
        })
        .collect()
}

/// A currently open built-in menu instance
///
/// At most one exists per view; opening a new one closes the previous one
/// unconditionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMenu {
    pub kind: ItemKind,
    pub acting_ids: Vec<String>,
    pub position: Position,
    pub entries: Vec<MenuAction>,
}
