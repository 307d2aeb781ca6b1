//! Browser interaction engine
//!
//! This module is the UI-agnostic core of browsr: the rules governing how a
//! flat set of selectable items and a tree of containers respond to pointer
//! gestures, and how a move operation is derived from a drag gesture and
//! committed exactly once. It is designed to be driven by any frontend (the
//! bundled ratatui host, tests, something else entirely) through the
//! normalized [`Gesture`]/[`Output`] vocabulary.
//!
//! # Architecture
//!
//! - `selection`: next-selection computation for click gestures
//! - `sort`: stable ordering of the visible projection
//! - `drag`: the drag session state machine
//! - `menu`: context-menu target resolution and dispatch
//! - `tree`: folder tree traversal and descendant checks
//! - `events`: the gesture/output boundary types
//!
//! [`BrowserEngine`] glues these together: it owns the interaction state
//! record (selection, anchor, sort, drag session, open menu, current
//! folder) and applies one gesture at a time, synchronously, on the thread
//! that owns the view. Every malformed input degrades to a no-op; nothing
//! here returns an error or panics.

pub mod drag;
pub mod events;
pub mod menu;
pub mod selection;
pub mod sort;
pub mod tree;

pub use drag::{DEFAULT_DRAG_THRESHOLD, DragResolution, DragSessionManager, DragState, MoveRequest, PointerUpOutcome};
pub use events::{Gesture, Output, Position};
pub use menu::{MenuAction, MenuConfig, MenuTarget, OpenMenu, SuppliedHandlers, builtin_entries, resolve_menu_target};
pub use selection::{Modifiers, SelectionSet, compute_selection};
pub use sort::{SortDirection, SortField, SortState, next_sort_state, sort_items};
pub use tree::{TreeRow, flatten, is_descendant};

use crate::registry::{Item, Registry};

/// Engine construction parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// Drag start threshold in host units; 0 is clamped to 1
    pub drag_threshold: u16,
    /// Menu dispatch configuration
    pub menu: MenuConfig,
    /// Sort active when the view mounts (`None` = registry order)
    pub initial_sort: Option<SortState>,
}

/// The interaction state record for one view instance
///
/// All ambient UI state (anchor, drag candidate, open menu) lives here as
/// named fields; transitions replace exposed sets wholesale so consumers'
/// change detection stays simple.
#[derive(Debug, Clone)]
pub struct BrowserEngine {
    selection: SelectionSet,
    anchor: Option<String>,
    sort: Option<SortState>,
    drag: DragSessionManager,
    open_menu: Option<OpenMenu>,
    current_folder: Option<String>,
    menu_config: MenuConfig,
}

impl BrowserEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            selection: SelectionSet::new(),
            anchor: None,
            sort: config.initial_sort,
            drag: DragSessionManager::new(if config.drag_threshold == 0 {
                DEFAULT_DRAG_THRESHOLD
            } else {
                config.drag_threshold
            }),
            open_menu: None,
            current_folder: None,
            menu_config: config.menu,
        }
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    #[must_use]
    pub const fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Current candidate drop target of an active drag
    #[must_use]
    pub fn drop_candidate(&self) -> Option<&str> {
        self.drag.candidate()
    }

    #[must_use]
    pub const fn open_menu(&self) -> Option<&OpenMenu> {
        self.open_menu.as_ref()
    }

    #[must_use]
    pub fn current_folder(&self) -> Option<&str> {
        self.current_folder.as_deref()
    }

    /// The visible projection: the current folder's items in display order
    #[must_use]
    pub fn visible<'a>(&self, registry: &'a Registry) -> Vec<&'a Item> {
        let items = registry.children_of(self.current_folder.as_deref());
        match self.sort {
            Some(state) => sort_items(&items, state),
            None => items,
        }
    }

    /// Reconcile engine state with a fresh registry snapshot
    ///
    /// Prunes stale selection ids and a stale anchor. Emits a
    /// `SelectionChanged` when pruning removed anything.
    pub fn sync(&mut self, registry: &Registry) -> Vec<Output> {
        let mut out = Vec::new();
        if self.selection.prune(registry) {
            out.push(self.selection_output());
        }
        if let Some(anchor) = &self.anchor
            && !registry.contains(anchor)
        {
            self.anchor = None;
        }
        out
    }

    /// Apply one gesture against the given snapshot
    ///
    /// Synchronous and infallible: invalid gestures (unknown ids, locked
    /// items, ineligible drops) produce no state change and no output.
    pub fn apply(&mut self, registry: &Registry, gesture: Gesture) -> Vec<Output> {
        let mut out = self.sync(registry);

        match gesture {
            Gesture::Click { id, modifiers } => {
                self.close_menu(&mut out);
                self.click(registry, &id, modifiers, &mut out);
            }
            Gesture::PointerDown { id, modifiers, position } => {
                self.close_menu(&mut out);
                if let Some(item) = registry.get(&id) {
                    self.drag.pointer_down(item, modifiers, position);
                }
            }
            Gesture::PointerMove { position, over } => {
                self.drag.pointer_move(position, over.as_deref(), registry);
            }
            Gesture::PointerUp { over } => match self.drag.pointer_up(over.as_deref(), registry) {
                PointerUpOutcome::Click { id, modifiers } => {
                    self.click(registry, &id, modifiers, &mut out);
                }
                PointerUpOutcome::Resolved(DragResolution::Committed(request)) => {
                    out.push(Output::MoveRequested {
                        moved_id: request.moved_id,
                        moved_kind: request.moved_kind,
                        new_parent_id: request.new_parent_id,
                    });
                }
                PointerUpOutcome::Resolved(DragResolution::Cancelled) | PointerUpOutcome::Ignored => {}
            },
            Gesture::DragCancel => {
                self.drag.cancel();
            }
            Gesture::ContextMenu { id, position } => {
                self.context_menu(registry, &id, position, &mut out);
            }
            Gesture::SortHeaderClick { field } => {
                let next = next_sort_state(self.sort, field);
                self.sort = Some(next);
                out.push(Output::SortChanged {
                    field: next.field,
                    direction: next.direction,
                });
            }
            Gesture::Navigate { folder } => {
                self.navigate(registry, folder, &mut out);
            }
            Gesture::CloseMenu => {
                self.close_menu(&mut out);
            }
        }

        out
    }

    fn click(&mut self, registry: &Registry, id: &str, modifiers: Modifiers, out: &mut Vec<Output>) {
        let Some(item) = registry.get(id) else {
            return;
        };
        if item.locked {
            return;
        }

        let ordered = self.visible(registry);
        if !ordered.iter().any(|entry| entry.id == id) {
            // Folders stay clickable through the tree pane even when the
            // listing is scoped to another folder; files outside the
            // listing are not clickable at all. Range spans need the
            // visible order, so out-of-listing clicks support plain and
            // toggle selection only.
            if !item.is_folder() {
                return;
            }
            if modifiers.toggle {
                if !self.selection.remove(id) {
                    self.selection.insert(id.to_string(), item.kind());
                }
            } else {
                self.selection = SelectionSet::singleton(id, item.kind());
            }
            self.anchor = Some(id.to_string());
            out.push(self.selection_output());
            return;
        }

        let (next, next_anchor) =
            compute_selection(&self.selection, &ordered, id, modifiers, self.anchor.as_deref());
        self.selection = next;
        self.anchor = next_anchor;

        // Emitted even when the set is idempotent: the gesture itself is
        // observable (e.g. to refresh a detail panel).
        out.push(self.selection_output());
    }

    fn context_menu(&mut self, registry: &Registry, id: &str, position: Position, out: &mut Vec<Output>) {
        let Some(item) = registry.get(id) else {
            return;
        };
        if item.locked {
            return;
        }
        let kind = item.kind();

        let target = resolve_menu_target(id, kind, &self.selection);
        if target.collapse_selection {
            self.selection = SelectionSet::singleton(id, kind);
            self.anchor = Some(id.to_string());
            out.push(self.selection_output());
        }

        self.close_menu(out);

        if self.menu_config.external(kind) {
            out.push(Output::MenuHandlerInvoked {
                acting_ids: target.acting_ids,
                kind,
                position,
            });
            return;
        }

        let entries = builtin_entries(kind, &self.menu_config);
        if entries.is_empty() {
            // Nothing to offer; an empty menu is worse than none.
            return;
        }

        self.open_menu = Some(OpenMenu {
            kind,
            acting_ids: target.acting_ids.clone(),
            position,
            entries: entries.clone(),
        });
        out.push(Output::MenuOpenRequested {
            acting_ids: target.acting_ids,
            kind,
            position,
            entries,
        });
    }

    fn navigate(&mut self, registry: &Registry, folder: Option<String>, out: &mut Vec<Output>) {
        if let Some(id) = &folder
            && registry.kind_of(id) != Some(crate::registry::ItemKind::Folder)
        {
            return;
        }
        if folder == self.current_folder {
            return;
        }

        self.drag.cancel();
        self.close_menu(out);
        self.current_folder = folder;

        // Same-folder-scoped selection is invalid in the new folder.
        self.selection.clear();
        self.anchor = None;
        out.push(self.selection_output());
    }

    fn close_menu(&mut self, out: &mut Vec<Output>) {
        if self.open_menu.take().is_some() {
            out.push(Output::MenuClosed);
        }
    }

    fn selection_output(&self) -> Output {
        Output::SelectionChanged {
            files: self.selection.files.iter().cloned().collect(),
            folders: self.selection.folders.iter().cloned().collect(),
        }
    }
}

impl Default for BrowserEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FileMeta, ItemKind};
    use crate::testing::sample_registry as registry;

    fn engine() -> BrowserEngine {
        BrowserEngine::new(EngineConfig {
            drag_threshold: 2,
            menu: MenuConfig {
                file_handlers: SuppliedHandlers { download: true, delete: true, ..Default::default() },
                folder_handlers: SuppliedHandlers { open: true, ..Default::default() },
                ..Default::default()
            },
            initial_sort: None,
        })
    }

    fn click(id: &str) -> Gesture {
        Gesture::Click { id: id.into(), modifiers: Modifiers::default() }
    }

    #[test]
    fn test_click_emits_even_when_idempotent() {
        let reg = registry();
        let mut eng = engine();

        let first = eng.apply(&reg, click("f1"));
        assert_eq!(first.len(), 1);
        assert!(matches!(&first[0], Output::SelectionChanged { files, .. } if files == &vec!["f1".to_string()]));

        // Same click again: set unchanged, gesture still observable.
        let second = eng.apply(&reg, click("f1"));
        assert_eq!(second, first);
    }

    #[test]
    fn test_click_on_unknown_id_is_silent() {
        let reg = registry();
        let mut eng = engine();
        assert!(eng.apply(&reg, click("ghost")).is_empty());
    }

    #[test]
    fn test_click_on_item_outside_current_folder_is_silent() {
        let reg = registry();
        let mut eng = engine();
        // in_docs is not visible at the root level.
        assert!(eng.apply(&reg, click("in_docs")).is_empty());
    }

    #[test]
    fn test_tree_pane_folder_clicks_outside_listing() {
        let reg = registry();
        let mut eng = engine();

        eng.apply(&reg, Gesture::Navigate { folder: Some("docs".into()) });
        let out = eng.apply(&reg, click("docs"));
        assert!(matches!(&out[0], Output::SelectionChanged { folders, .. }
            if folders == &vec!["docs".to_string()]));
        assert_eq!(eng.anchor(), Some("docs"));

        // Toggle removes it again; files outside the listing stay silent.
        let out = eng.apply(&reg, Gesture::Click {
            id: "docs".into(),
            modifiers: Modifiers { toggle: true, range: false },
        });
        assert!(matches!(&out[0], Output::SelectionChanged { folders, .. } if folders.is_empty()));
        assert!(eng.apply(&reg, click("f1")).is_empty());
    }

    #[test]
    fn test_navigation_clears_selection_and_anchor() {
        let reg = registry();
        let mut eng = engine();

        eng.apply(&reg, click("f1"));
        assert_eq!(eng.anchor(), Some("f1"));

        let out = eng.apply(&reg, Gesture::Navigate { folder: Some("docs".into()) });
        assert!(eng.selection().is_empty());
        assert!(eng.anchor().is_none());
        assert_eq!(eng.current_folder(), Some("docs"));
        assert!(matches!(&out[0], Output::SelectionChanged { files, folders }
            if files.is_empty() && folders.is_empty()));

        // Navigating to the folder we are already in changes nothing.
        assert!(eng.apply(&reg, Gesture::Navigate { folder: Some("docs".into()) }).is_empty());
    }

    #[test]
    fn test_navigate_to_file_id_is_rejected() {
        let reg = registry();
        let mut eng = engine();
        assert!(eng.apply(&reg, Gesture::Navigate { folder: Some("f1".into()) }).is_empty());
        assert_eq!(eng.current_folder(), None);
    }

    #[test]
    fn test_pointer_gestures_synthesize_click_below_threshold() {
        let reg = registry();
        let mut eng = engine();

        eng.apply(&reg, Gesture::PointerDown {
            id: "f2".into(),
            modifiers: Modifiers::default(),
            position: Position { x: 4, y: 4 },
        });
        let out = eng.apply(&reg, Gesture::PointerUp { over: None });

        assert!(matches!(&out[0], Output::SelectionChanged { files, .. } if files == &vec!["f2".to_string()]));
        assert_eq!(eng.anchor(), Some("f2"));
    }

    #[test]
    fn test_drag_commit_emits_single_move() {
        let reg = registry();
        let mut eng = engine();

        eng.apply(&reg, Gesture::PointerDown {
            id: "f1".into(),
            modifiers: Modifiers::default(),
            position: Position { x: 0, y: 0 },
        });
        eng.apply(&reg, Gesture::PointerMove {
            position: Position { x: 0, y: 5 },
            over: Some("docs".into()),
        });
        assert_eq!(eng.drop_candidate(), Some("docs"));

        let out = eng.apply(&reg, Gesture::PointerUp { over: Some("docs".into()) });
        assert_eq!(out, vec![Output::MoveRequested {
            moved_id: "f1".into(),
            moved_kind: ItemKind::File,
            new_parent_id: "docs".into(),
        }]);

        // No selection side effects, no second emission.
        assert!(eng.apply(&reg, Gesture::PointerUp { over: Some("docs".into()) }).is_empty());
    }

    #[test]
    fn test_drag_cancel_prevents_commit() {
        let reg = registry();
        let mut eng = engine();

        eng.apply(&reg, Gesture::PointerDown {
            id: "f1".into(),
            modifiers: Modifiers::default(),
            position: Position { x: 0, y: 0 },
        });
        eng.apply(&reg, Gesture::PointerMove {
            position: Position { x: 0, y: 5 },
            over: Some("docs".into()),
        });
        eng.apply(&reg, Gesture::DragCancel);

        assert!(eng.apply(&reg, Gesture::PointerUp { over: Some("docs".into()) }).is_empty());
    }

    #[test]
    fn test_context_menu_collapses_and_opens_builtin() {
        let reg = registry();
        let mut eng = engine();

        eng.apply(&reg, click("f1"));
        let out = eng.apply(&reg, Gesture::ContextMenu {
            id: "f2".into(),
            position: Position { x: 7, y: 3 },
        });

        assert!(matches!(&out[0], Output::SelectionChanged { files, .. } if files == &vec!["f2".to_string()]));
        assert!(matches!(&out[1], Output::MenuOpenRequested { acting_ids, kind, entries, .. }
            if acting_ids == &vec!["f2".to_string()]
                && *kind == ItemKind::File
                && entries == &vec![MenuAction::Download, MenuAction::Delete]));
        assert!(eng.open_menu().is_some());
    }

    #[test]
    fn test_opening_second_menu_closes_first() {
        let reg = registry();
        let mut eng = engine();

        eng.apply(&reg, Gesture::ContextMenu { id: "f1".into(), position: Position::default() });
        let out = eng.apply(&reg, Gesture::ContextMenu { id: "docs".into(), position: Position::default() });

        assert!(out.contains(&Output::MenuClosed));
        let menu = eng.open_menu().unwrap();
        assert_eq!(menu.kind, ItemKind::Folder);
        assert_eq!(menu.entries, vec![MenuAction::Open]);
    }

    #[test]
    fn test_external_handler_bypasses_builtin_menu() {
        let reg = registry();
        let mut eng = BrowserEngine::new(EngineConfig {
            drag_threshold: 2,
            menu: MenuConfig { external_file_menu: true, ..Default::default() },
            initial_sort: None,
        });

        let out = eng.apply(&reg, Gesture::ContextMenu {
            id: "f1".into(),
            position: Position { x: 1, y: 2 },
        });

        assert!(out.iter().any(|o| matches!(o, Output::MenuHandlerInvoked { acting_ids, .. }
            if acting_ids == &vec!["f1".to_string()])));
        assert!(eng.open_menu().is_none());
    }

    #[test]
    fn test_sort_header_click_emits_transition() {
        let reg = registry();
        let mut eng = engine();

        let out = eng.apply(&reg, Gesture::SortHeaderClick { field: SortField::Name });
        assert_eq!(out, vec![Output::SortChanged {
            field: SortField::Name,
            direction: SortDirection::Ascending,
        }]);

        let out = eng.apply(&reg, Gesture::SortHeaderClick { field: SortField::Name });
        assert_eq!(out, vec![Output::SortChanged {
            field: SortField::Name,
            direction: SortDirection::Descending,
        }]);
    }

    #[test]
    fn test_sync_prunes_stale_selection() {
        let reg = registry();
        let mut eng = engine();
        eng.apply(&reg, click("f1"));

        let smaller = Registry::new(vec![Item::file("f2", "f2.txt", None, FileMeta::default())]).unwrap();
        let out = eng.sync(&smaller);

        assert!(matches!(&out[0], Output::SelectionChanged { files, .. } if files.is_empty()));
        assert!(eng.anchor().is_none());
    }
}
