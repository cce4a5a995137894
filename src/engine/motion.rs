//! Motion constraint for the dragged card.
//!
//! The card only moves vertically and stays inside its own group: its top edge
//! never rises above the list container, and its center never sinks past the
//! center line of the group's (nominal, fully expanded) trash region.

use crate::model::{Rect, Transform};

/// Correct the raw pointer-driven transform.
///
/// `dragged` is the card's resting rect and `container` the group's item-list
/// rect. Without both rects only the horizontal pin applies.
pub fn constrain_to_group(
    raw: Transform,
    dragged: Option<Rect>,
    container: Option<Rect>,
    trash_half_height: f64,
) -> Transform {
    let (dragged, container) = match (dragged, container) {
        (Some(dragged), Some(container)) => (dragged, container),
        _ => return Transform::new(0.0, raw.y),
    };

    let mut y = raw.y;

    if dragged.top + y < container.top {
        y = container.top - dragged.top;
    }

    // Top edge at bottom + (H - h) puts the card's center on the trash center.
    let half_height = dragged.height / 2.0;
    let lowest_top = container.bottom() + (trash_half_height - half_height);
    if dragged.top + y > lowest_top {
        y = lowest_top - dragged.top;
    }

    Transform::new(0.0, y)
}
