//! Which timetable is displayed.

use crate::model::{Item, ItemId};
use chrono::{DateTime, Duration, Utc};

/// How the displayed selection changed after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// The selection was not affected.
    Unchanged,
    /// The selected item went away; another one is displayed now.
    Moved(ItemId),
    /// Nothing is left to display.
    Cleared,
}

/// Pick the timetable to display after loading.
///
/// `items` must be in display order (newest first). A timetable created within
/// `window` of `now` wins, since the user just saved it; otherwise the last
/// viewed one if it still exists; otherwise the newest.
pub fn initial_selection(
    items: &[Item],
    last_viewed: Option<&ItemId>,
    now: DateTime<Utc>,
    window: Duration,
) -> Option<ItemId> {
    let newest = items.iter().max_by_key(|item| item.created_at)?;

    if now.signed_duration_since(newest.created_at) < window {
        return Some(newest.id.clone());
    }

    last_viewed
        .and_then(|id| items.iter().find(|item| &item.id == id))
        .map(|item| item.id.clone())
        .or_else(|| Some(newest.id.clone()))
}
