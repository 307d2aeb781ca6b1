//! Drag session manager
//!
//! Tracks one in-progress drag gesture through
//! `idle -> armed -> dragging -> {committed, cancelled} -> idle`.
//!
//! A pointer-down arms the session; the drag only starts once the pointer
//! has moved past a distance threshold, so simple clicks never turn into
//! accidental drags. The dragged set is the single item under the pointer,
//! not the full selection. A committed session emits exactly one move
//! instruction; actually mutating the backing store is the host's job.

use crate::engine::events::Position;
use crate::engine::selection::Modifiers;
use crate::engine::tree;
use crate::registry::{Item, ItemKind, Registry};

/// Default start-distance threshold, in host units (terminal cells for the
/// TUI host). Never zero.
pub const DEFAULT_DRAG_THRESHOLD: u16 = 2;

/// State of the drag session state machine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress
    #[default]
    Idle,

    /// Pointer is down on an item but has not crossed the threshold;
    /// releasing now is a click, not a drop
    Armed {
        id: String,
        kind: ItemKind,
        modifiers: Modifiers,
        origin: Position,
    },

    /// Threshold crossed; `candidate` is the eligible container currently
    /// under the pointer, if any
    Dragging {
        id: String,
        kind: ItemKind,
        candidate: Option<String>,
    },
}

/// The single move instruction a committed drag resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub moved_id: String,
    pub moved_kind: ItemKind,
    pub new_parent_id: String,
}

/// Terminal outcome of a drag session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragResolution {
    /// Released over an eligible container
    Committed(MoveRequest),
    /// Released elsewhere, or explicitly cancelled
    Cancelled,
}

/// What a pointer release amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerUpOutcome {
    /// The session never left `armed`: the gesture was a click
    Click { id: String, modifiers: Modifiers },
    /// The session was dragging and resolved
    Resolved(DragResolution),
    /// No session was active
    Ignored,
}

/// Tracks at most one drag session per view instance
#[derive(Debug, Clone)]
pub struct DragSessionManager {
    state: DragState,
    threshold: u16,
}

impl DragSessionManager {
    /// Create a manager with the given start threshold (clamped to >= 1)
    #[must_use]
    pub fn new(threshold: u16) -> Self {
        Self {
            state: DragState::Idle,
            threshold: threshold.max(1),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Id of the item being dragged, once the threshold has been crossed
    #[must_use]
    pub fn dragged_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Current candidate drop target, if any
    #[must_use]
    pub fn candidate(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { candidate, .. } => candidate.as_deref(),
            _ => None,
        }
    }

    /// Arm a session on pointer-down
    ///
    /// Ignored while another session is active (gestures are not queued)
    /// and for locked items.
    pub fn pointer_down(&mut self, item: &Item, modifiers: Modifiers, position: Position) {
        if self.is_active() || item.locked {
            return;
        }
        self.state = DragState::Armed {
            id: item.id.clone(),
            kind: item.kind(),
            modifiers,
            origin: position,
        };
    }

    /// Feed a pointer move; `over` is the container id under the pointer
    ///
    /// Crossing the threshold promotes `armed` to `dragging`. While
    /// dragging, the candidate reflects only this most recent move.
    pub fn pointer_move(&mut self, position: Position, over: Option<&str>, registry: &Registry) {
        match &self.state {
            DragState::Armed { id, kind, origin, .. } => {
                if origin.distance_to(position) >= self.threshold {
                    let candidate = eligible_target(id, *kind, over, registry);
                    self.state = DragState::Dragging {
                        id: id.clone(),
                        kind: *kind,
                        candidate,
                    };
                }
            }
            DragState::Dragging { id, kind, .. } => {
                let candidate = eligible_target(id, *kind, over, registry);
                if let DragState::Dragging { candidate: slot, .. } = &mut self.state {
                    *slot = candidate;
                }
            }
            DragState::Idle => {}
        }
    }

    /// Resolve the session on pointer release
    ///
    /// Eligibility is re-evaluated against `over` at release time; a
    /// dragging session with no eligible target cancels silently.
    pub fn pointer_up(&mut self, over: Option<&str>, registry: &Registry) -> PointerUpOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => PointerUpOutcome::Ignored,
            DragState::Armed { id, modifiers, .. } => PointerUpOutcome::Click { id, modifiers },
            DragState::Dragging { id, kind, .. } => {
                let resolution = match eligible_target(&id, kind, over, registry) {
                    Some(target) => DragResolution::Committed(MoveRequest {
                        moved_id: id,
                        moved_kind: kind,
                        new_parent_id: target,
                    }),
                    None => DragResolution::Cancelled,
                };
                PointerUpOutcome::Resolved(resolution)
            }
        }
    }

    /// Explicit cancellation (e.g. Escape); immediate and synchronous
    ///
    /// Returns whether a session was actually active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = DragState::Idle;
        was_active
    }
}

impl Default for DragSessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

/// Resolve `over` to an eligible drop target for the dragged item
///
/// Eligible iff it names a folder that is not the dragged item itself and,
/// when a folder is being dragged, not one of its descendants.
fn eligible_target(
    dragged_id: &str,
    dragged_kind: ItemKind,
    over: Option<&str>,
    registry: &Registry,
) -> Option<String> {
    let over = over?;
    let target = registry.get(over)?;
    if !target.is_folder() || over == dragged_id {
        return None;
    }
    if dragged_kind == ItemKind::Folder && tree::is_descendant(over, dragged_id, registry) {
        return None;
    }
    Some(target.id.clone())
}
