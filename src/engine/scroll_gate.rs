//! Auto-scroll gate.
//!
//! A pure function of the current frame's target, pointer and scroll container,
//! recomputed after the resolver on every pointer move.

use crate::model::{DropTarget, Rect};

/// Whether the ancestor scroll container may auto-scroll this frame.
///
/// Over items or over nothing the container scrolls freely. Over a trash
/// target only the bottom `hot_zone_px` of the container's visible height
/// scrolls; everywhere else the aim stays still. Without a measured container
/// a trash hover never scrolls.
pub fn scroll_allowed(
    target: Option<&DropTarget>,
    pointer_y: f64,
    scroll_container: Option<Rect>,
    hot_zone_px: f64,
) -> bool {
    match target {
        Some(target) if target.is_trash() => match scroll_container {
            Some(container) => pointer_y > container.bottom() - hot_zone_px,
            None => false,
        },
        _ => true,
    }
}
