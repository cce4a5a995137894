//! Collision resolution: which drop target wins this frame.
//!
//! Pure and stateless; re-derived from the current inputs on every pointer move.
//!
//! # Priority
//!
//! 1. Pointer strictly inside the active group's trash region.
//! 2. Overshoot: pointer below the trash region's bottom edge while within its
//!    horizontal span. Fast drags routinely jump past a thin target; counting
//!    them as a hit keeps a delete from silently turning into "no target".
//! 3. Nearest center among the active group's item cells (ties go to the
//!    earlier cell in document order).
//!
//! Cells of other groups are never candidates, so a reorder can never cross
//! groups.

use super::targets::TargetRegistry;
use crate::model::{DropTarget, GroupKey, ItemId, Point};

/// Why a target won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Pointer inside the trash region.
    TrashContained,
    /// Pointer past the trash region's bottom edge.
    TrashOvershoot,
    /// Item cell whose center is closest to the dragged card's center.
    ClosestCenter,
}

/// A winning target and the rule that chose it.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    /// The winning target.
    pub target: DropTarget,
    /// Rule that picked it.
    pub kind: CollisionKind,
}

/// Per-frame inputs to the resolver.
#[derive(Debug, Clone, Copy)]
pub struct CollisionInput<'a> {
    /// Current pointer position.
    pub pointer: Point,
    /// Group of the item being dragged.
    pub active_group: &'a GroupKey,
    /// Center of the dragged card as it is drawn this frame.
    pub dragged_center: Point,
}

/// Resolve the winning target with the rule that chose it.
pub fn detect_collision(input: CollisionInput<'_>, registry: &TargetRegistry) -> Option<Collision> {
    if let Some(trash) = registry.trash(input.active_group) {
        let kind = if trash.contains_strictly(input.pointer) {
            Some(CollisionKind::TrashContained)
        } else if input.pointer.y > trash.bottom() && trash.spans_x(input.pointer.x) {
            Some(CollisionKind::TrashOvershoot)
        } else {
            None
        };

        if let Some(kind) = kind {
            return Some(Collision {
                target: DropTarget::Trash {
                    group: input.active_group.clone(),
                },
                kind,
            });
        }
    }

    closest_center(input, registry).map(|(id, group)| Collision {
        target: DropTarget::Item {
            id: id.clone(),
            group: group.clone(),
        },
        kind: CollisionKind::ClosestCenter,
    })
}

/// Resolve the winning target.
pub fn resolve_collision(input: CollisionInput<'_>, registry: &TargetRegistry) -> Option<DropTarget> {
    detect_collision(input, registry).map(|collision| collision.target)
}

fn closest_center<'r>(
    input: CollisionInput<'_>,
    registry: &'r TargetRegistry,
) -> Option<(&'r ItemId, &'r GroupKey)> {
    let mut best: Option<(f64, &'r ItemId, &'r GroupKey)> = None;

    let candidates = registry
        .items()
        .iter()
        .filter(|region| &region.group == input.active_group);

    for region in candidates {
        let distance = input.dragged_center.distance_to(region.rect.center());
        // Strict comparison keeps the earliest cell on ties.
        if best.map_or(true, |(best_distance, _, _)| distance < best_distance) {
            best = Some((distance, &region.id, &region.group));
        }
    }

    best.map(|(_, id, group)| (id, group))
}

#[cfg(test)]
#[path = "collision_tests.rs"]
mod tests;
