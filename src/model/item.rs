//! Saved timetable records and drop targets.

use super::identifiers::{DeviceId, GroupKey, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved timetable as persisted by the storage collaborator.
///
/// Within a group, `position` values form the permutation `0..n-1` after every
/// successful commit. Mid-drag nothing here changes; only a commit writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Device that owns this record.
    pub owner: DeviceId,
    /// Owning festival; items are only ever reordered within one group.
    pub group_key: GroupKey,
    /// Position within the group (0-based).
    pub position: u32,
    /// User-visible name.
    pub title: String,
    /// Creation time, drives display order and initial selection.
    pub created_at: DateTime<Utc>,
    /// Stamped on every commit that touches the record.
    pub last_modified: DateTime<Utc>,
}

impl Item {
    /// Create a record whose modification stamp equals its creation stamp.
    pub fn new(
        id: ItemId,
        owner: DeviceId,
        group_key: GroupKey,
        position: u32,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            group_key,
            position,
            title: title.into(),
            created_at,
            last_modified: created_at,
        }
    }
}

/// A region that can win a pointer release.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Another item of the same group: release reorders.
    Item {
        /// The item under the dragged card.
        id: ItemId,
        /// Group the item was registered under.
        group: GroupKey,
    },
    /// The group's trash region: release deletes.
    Trash {
        /// Group owning the trash region.
        group: GroupKey,
    },
}

impl DropTarget {
    /// Group the target belongs to.
    pub fn group(&self) -> &GroupKey {
        match self {
            DropTarget::Item { group, .. } | DropTarget::Trash { group } => group,
        }
    }

    /// Whether releasing here deletes.
    pub fn is_trash(&self) -> bool {
        matches!(self, DropTarget::Trash { .. })
    }

    /// Item ID for item targets.
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            DropTarget::Item { id, .. } => Some(id),
            DropTarget::Trash { .. } => None,
        }
    }
}
