//! Drop target registration.
//!
//! The rendering layer measures every item cell, every group's item-list
//! container and every group's trash region on each layout pass and registers
//! them here. Nothing is retained between passes except what the host
//! re-registers.

use crate::config::EngineConfig;
use crate::model::{GroupKey, ItemId, Rect};
use std::collections::HashMap;

/// A registered item cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRegion {
    /// Item rendered in the cell.
    pub id: ItemId,
    /// Group the cell was registered under.
    pub group: GroupKey,
    /// Measured bounds.
    pub rect: Rect,
}

/// Bounding rectangles of everything that can win a release.
///
/// Item registration order is document order; the resolver uses it to break
/// distance ties.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    items: Vec<ItemRegion>,
    trash: HashMap<GroupKey, Rect>,
    lists: HashMap<GroupKey, Rect>,
}

impl TargetRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; call at the start of a layout pass.
    pub fn clear(&mut self) {
        self.items.clear();
        self.trash.clear();
        self.lists.clear();
    }

    /// Register (or re-measure) an item cell.
    pub fn register_item(&mut self, group: GroupKey, id: ItemId, rect: Rect) {
        match self.items.iter_mut().find(|region| region.id == id) {
            Some(region) => {
                region.group = group;
                region.rect = rect;
            }
            None => self.items.push(ItemRegion { id, group, rect }),
        }
    }

    /// Register a group's trash region at its current (possibly zero) height.
    pub fn register_trash(&mut self, group: GroupKey, rect: Rect) {
        self.trash.insert(group, rect);
    }

    /// Register a group's item-list container.
    pub fn register_list(&mut self, group: GroupKey, rect: Rect) {
        self.lists.insert(group, rect);
    }

    /// All item cells in document order.
    pub fn items(&self) -> &[ItemRegion] {
        &self.items
    }

    /// Item cells of one group in document order.
    pub fn items_in<'a>(&'a self, group: &'a GroupKey) -> impl Iterator<Item = &'a ItemRegion> + 'a {
        self.items.iter().filter(move |region| &region.group == group)
    }

    /// Bounds of one item cell.
    pub fn item_rect(&self, id: &ItemId) -> Option<Rect> {
        self.items.iter().find(|region| &region.id == id).map(|region| region.rect)
    }

    /// Bounds of a group's trash region.
    pub fn trash(&self, group: &GroupKey) -> Option<Rect> {
        self.trash.get(group).copied()
    }

    /// Bounds of a group's item-list container.
    pub fn list(&self, group: &GroupKey) -> Option<Rect> {
        self.lists.get(group).copied()
    }
}

/// How a group's trash region should be laid out this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrashZoneState {
    /// No drag in this group: zero height, not hit-testable.
    #[default]
    Hidden,
    /// This group is being dragged in: invisible but occupies space, so the
    /// resolver can detect the approach.
    Sensor,
    /// Hovering the trash or the group's last item: fully shown.
    Expanded,
}

impl TrashZoneState {
    /// Height the rendering layer should give the region.
    pub fn height(&self, config: &EngineConfig) -> f64 {
        match self {
            TrashZoneState::Hidden => 0.0,
            TrashZoneState::Sensor => config.trash_sensor_height_px,
            TrashZoneState::Expanded => config.trash_expanded_height_px(),
        }
    }

    /// Whether the region should be painted.
    pub fn is_visible(&self) -> bool {
        matches!(self, TrashZoneState::Expanded)
    }
}
