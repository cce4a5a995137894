//! The ordered, grouped collection of saved timetables.
//!
//! The store is the single source of truth rendered into groups. It changes only
//! through a commit (or a reload from the storage collaborator); drag sessions
//! read it but never write to it.

use super::selection::SelectionChange;
use crate::model::{DeviceId, GroupKey, Item, ItemId, PersistError};
use crate::persistence::Persistence;
use tracing::{debug, info};

/// Items sharing one group key, ordered by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    /// Shared group key.
    pub key: &'a GroupKey,
    /// Members in position order.
    pub items: Vec<&'a Item>,
}

impl<'a> Group<'a> {
    /// Last item in position order.
    pub fn last(&self) -> Option<&'a Item> {
        self.items.last().copied()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Saved timetables in display order (newest `created_at` first) plus the
/// currently displayed selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemStore {
    items: Vec<Item>,
    selected: Option<ItemId>,
}

impl ItemStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded records, newest first. Nothing is selected.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut store = Self::new();
        store.replace_all(items);
        store
    }

    /// Replace every record with an authoritative list.
    ///
    /// The selection survives if its item is still present.
    pub fn replace_all(&mut self, mut items: Vec<Item>) {
        // Stable: equal timestamps keep the collaborator's order.
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.items = items;
        if let Some(selected) = &self.selected {
            if self.get(selected).is_none() {
                debug!(item = %selected, "Selected item vanished on reload");
                self.selected = None;
            }
        }
    }

    /// Reload from the storage collaborator.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error; the store is unchanged in that case.
    pub async fn reload<P>(&mut self, persistence: &P, owner: &DeviceId) -> Result<(), PersistError>
    where
        P: Persistence + ?Sized,
    {
        let items = persistence.load_items(owner).await?;
        info!(owner = %owner, count = items.len(), "Reloaded timetables");
        self.replace_all(items);
        Ok(())
    }

    /// All records in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up one record.
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Group keys in the order they first appear in display order.
    pub fn group_keys(&self) -> Vec<&GroupKey> {
        let mut keys: Vec<&GroupKey> = Vec::new();
        for item in &self.items {
            if !keys.contains(&&item.group_key) {
                keys.push(&item.group_key);
            }
        }
        keys
    }

    /// One group's items ordered by position, ties broken by ID.
    pub fn group(&self, key: &GroupKey) -> Vec<&Item> {
        let mut members: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| &item.group_key == key)
            .collect();
        members.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        members
    }

    /// Every group, in [`group_keys`](Self::group_keys) order.
    pub fn groups(&self) -> Vec<Group<'_>> {
        self.group_keys()
            .into_iter()
            .map(|key| Group {
                key,
                items: self.group(key),
            })
            .collect()
    }

    /// Last item of a group in position order.
    pub fn last_item(&self, key: &GroupKey) -> Option<&Item> {
        self.group(key).last().copied()
    }

    /// Whether a group's positions are exactly `0..n-1`.
    pub fn is_contiguous(&self, key: &GroupKey) -> bool {
        self.group(key)
            .iter()
            .enumerate()
            .all(|(index, item)| item.position as usize == index)
    }

    /// The displayed item.
    pub fn selected(&self) -> Option<&Item> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Display `id`. Returns `false` (and leaves the selection) for unknown IDs.
    pub fn select(&mut self, id: &ItemId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    /// Display nothing.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Replace records by ID with their updated versions.
    pub(crate) fn apply_updates(&mut self, updated: Vec<Item>) {
        for item in updated {
            if let Some(existing) = self.items.iter_mut().find(|e| e.id == item.id) {
                *existing = item;
            }
        }
    }

    /// Remove one record, moving the selection off it if needed.
    ///
    /// A removed selection falls back to the first remaining item in display
    /// order, or clears when nothing is left.
    pub(crate) fn remove(&mut self, id: &ItemId) -> Option<(Item, SelectionChange)> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        let removed = self.items.remove(index);

        let change = if self.selected.as_ref() == Some(id) {
            match self.items.first() {
                Some(next) => {
                    self.selected = Some(next.id.clone());
                    SelectionChange::Moved(next.id.clone())
                }
                None => {
                    self.selected = None;
                    SelectionChange::Cleared
                }
            }
        } else {
            SelectionChange::Unchanged
        };

        Some((removed, change))
    }
}

#[cfg(test)]
#[path = "item_store_tests.rs"]
mod tests;
