//! Pure reorder planning.

use crate::model::{Item, ItemId};
use chrono::{DateTime, Utc};

/// Move one element from `from` to `to`, shifting everything in between.
///
/// Out-of-range indices leave the slice untouched.
pub fn move_element<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let element = items.remove(from);
    items.insert(to, element);
}

/// Compute the renumbered group after dropping `active` onto `over`.
///
/// `group` must be one group's items ordered by position. Returns every item of
/// the group with `position` reassigned to `0..n-1` in the new order and
/// `last_modified` stamped with `now`, or `None` when the move is a no-op
/// (same item, or either ID missing from the group).
pub fn plan_reorder(
    group: &[&Item],
    active: &ItemId,
    over: &ItemId,
    now: DateTime<Utc>,
) -> Option<Vec<Item>> {
    if active == over {
        return None;
    }
    let old_index = group.iter().position(|item| &item.id == active)?;
    let new_index = group.iter().position(|item| &item.id == over)?;

    let mut reordered: Vec<Item> = group.iter().map(|item| (*item).clone()).collect();
    move_element(&mut reordered, old_index, new_index);

    Some(renumber(reordered, now))
}

/// Reassign positions `0..n-1` in slice order and stamp every item.
pub fn renumber(items: Vec<Item>, now: DateTime<Utc>) -> Vec<Item> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, mut item)| {
            item.position = index as u32;
            item.last_modified = now;
            item
        })
        .collect()
}
