//! Normalized gesture and output vocabulary
//!
//! The boundary between any host (TUI, tests, other frontends) and the
//! engine. Hosts translate their platform's pointer/keyboard events into
//! [`Gesture`]s and interpret the [`Output`]s the engine emits; the engine
//! itself never touches a platform event type.

use serde::{Deserialize, Serialize};

use crate::engine::menu::MenuAction;
use crate::engine::selection::Modifiers;
use crate::engine::sort::{SortDirection, SortField};
use crate::registry::ItemKind;

/// Pointer position in host units (terminal cells for the TUI host)
///
/// The engine only ever measures distances between positions and passes
/// them through to menu outputs; it never interprets the units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    /// Chebyshev distance, the natural metric on a cell grid
    #[must_use]
    pub const fn distance_to(self, other: Self) -> u16 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }
}

/// A normalized input gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Left click on an item, for hosts that do their own click detection.
    /// Hosts using `PointerDown`/`PointerUp` get clicks synthesized by the
    /// engine instead.
    Click { id: String, modifiers: Modifiers },

    /// Left button pressed on an item; arms a potential drag
    PointerDown {
        id: String,
        modifiers: Modifiers,
        position: Position,
    },

    /// Pointer moved while the button is down; `over` names the container
    /// currently under the pointer, if any
    PointerMove { position: Position, over: Option<String> },

    /// Left button released; `over` as for `PointerMove`
    PointerUp { over: Option<String> },

    /// Explicit drag cancellation (e.g. Escape)
    DragCancel,

    /// Right click on an item
    ContextMenu { id: String, position: Position },

    /// Click on a sort header control
    SortHeaderClick { field: SortField },

    /// Change the current folder (`None` navigates to the root level)
    Navigate { folder: Option<String> },

    /// Host closed the built-in menu (click-away, Escape)
    CloseMenu,
}

/// An event the engine emits back to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The selection set was replaced
    SelectionChanged {
        files: Vec<String>,
        folders: Vec<String>,
    },

    /// The sort state changed
    SortChanged {
        field: SortField,
        direction: SortDirection,
    },

    /// A drag committed; emitted exactly once per committed gesture. The
    /// host owns the actual mutation and the engine does not wait for it.
    MoveRequested {
        moved_id: String,
        moved_kind: ItemKind,
        new_parent_id: String,
    },

    /// The built-in menu should be shown at `position`
    MenuOpenRequested {
        acting_ids: Vec<String>,
        kind: ItemKind,
        position: Position,
        entries: Vec<MenuAction>,
    },

    /// An externally configured menu handler should be called instead of
    /// rendering anything
    MenuHandlerInvoked {
        acting_ids: Vec<String>,
        kind: ItemKind,
        position: Position,
    },

    /// The previously open built-in menu is no longer open
    MenuClosed,
}
