//! Sort engine
//!
//! Stable, deterministic ordering of the visible projection. Sorting is a
//! pure function over the snapshot: ties keep their registry order, and the
//! header-click transition depends only on the current sort state, never on
//! the data being sorted.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::registry::Item;

/// Field the listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Size,
    Date,
    Uploader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort; the engine's default is `None` (registry order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortField {
    /// Column label for list headers
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Date => "Uploaded",
            Self::Uploader => "By",
        }
    }
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Indicator glyph for list headers
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Ascending => "^",
            Self::Descending => "v",
        }
    }
}

/// Header-click transition: clicking the active field toggles direction,
/// clicking any other field resets to ascending
#[must_use]
pub fn next_sort_state(current: Option<SortState>, clicked: SortField) -> SortState {
    match current {
        Some(state) if state.field == clicked => SortState {
            field: clicked,
            direction: state.direction.reversed(),
        },
        _ => SortState {
            field: clicked,
            direction: SortDirection::Ascending,
        },
    }
}

/// Order a projection by the given sort state (stable)
#[must_use]
pub fn sort_items<'a>(items: &[&'a Item], state: SortState) -> Vec<&'a Item> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| compare(a, b, state));
    ordered
}

fn compare(a: &Item, b: &Item, state: SortState) -> Ordering {
    let ord = match state.field {
        SortField::Name => name_key(a).cmp(&name_key(b)),
        SortField::Uploader => uploader_key(a).cmp(&uploader_key(b)),
        // Folders have no intrinsic size and sort as a fixed constant below
        // any file. Policy choice, not a derived aggregate.
        SortField::Size => size_key(a).cmp(&size_key(b)),
        // Items lacking a date sort last regardless of direction, so the
        // direction applies only when both sides have one.
        SortField::Date => {
            return match (date_key(a), date_key(b)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => apply_direction(x.cmp(&y), state.direction),
            };
        }
    };
    apply_direction(ord, state.direction)
}

const fn apply_direction(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

fn name_key(item: &Item) -> String {
    item.name.to_lowercase()
}

fn uploader_key(item: &Item) -> String {
    item.as_file()
        .and_then(|meta| meta.uploaded_by.as_deref())
        .unwrap_or_default()
        .to_lowercase()
}

const fn size_key(item: &Item) -> (u8, u64) {
    match item.as_file() {
        Some(meta) => (1, meta.size),
        None => (0, 0),
    }
}

fn date_key(item: &Item) -> Option<chrono::DateTime<chrono::Utc>> {
    item.as_file().and_then(|meta| meta.uploaded_at)
}
