//! Commit handler: applies a finished gesture to the item store.
//!
//! Commits are pessimistic. Persistence is awaited first and the store only
//! changes once the collaborator confirms, so a failure leaves the store at its
//! last confirmed state.

use super::session::CommitRequest;
use crate::model::{CommitError, CommitOp, DropTarget, GroupKey, Item, ItemId};
use crate::persistence::{Confirm, Persistence};
use crate::store::{plan_reorder, renumber, ItemStore, SelectionChange};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

/// Why a commit changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Released over nothing (or cancelled).
    NoTarget,
    /// Released back onto the dragged item.
    SameItem,
    /// The dragged item is gone from the store.
    UnknownItem,
    /// The target belongs to another group.
    ForeignGroup,
    /// The target item is gone from the store.
    UnknownTarget,
}

/// What a commit did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Nothing changed.
    NoOp(NoOpReason),
    /// The user declined the delete confirmation.
    Declined,
    /// The item was deleted and its group closed the gap.
    Deleted {
        /// Removed record.
        item: Item,
        /// Effect on the displayed item.
        selection: SelectionChange,
    },
    /// The group was reordered.
    Reordered {
        /// Reordered group.
        group: GroupKey,
        /// The group's item IDs in their new position order.
        order: Vec<ItemId>,
    },
}

/// Apply `request` to `store`.
///
/// # Arguments
/// * `store` - The item store; only written after persistence succeeds
/// * `request` - Dragged item, its group and the final target
/// * `persistence` - Storage collaborator
/// * `confirm` - Asked before any delete
/// * `now` - Stamp for every touched record's `last_modified`
///
/// # Behavior
/// - Trash target: confirm, delete, then renumber the rest of the group so its
///   positions stay contiguous
/// - Item target in the same group: single-element move, then renumber and
///   persist the whole group as one batch
/// - Anything else: no-op
///
/// # Errors
///
/// Returns [`CommitError`] when the collaborator fails. The engine does not
/// retry; callers should surface it and reload.
pub async fn commit<P, C>(
    store: &mut ItemStore,
    request: &CommitRequest,
    persistence: &P,
    confirm: &C,
    now: DateTime<Utc>,
) -> Result<CommitOutcome, CommitError>
where
    P: Persistence + ?Sized,
    C: Confirm + ?Sized,
{
    let Some(target) = &request.target else {
        return Ok(CommitOutcome::NoOp(NoOpReason::NoTarget));
    };

    let Some(active) = store.get(&request.item_id) else {
        warn!(item = %request.item_id, "Dragged item no longer in store, ignoring drop");
        return Ok(CommitOutcome::NoOp(NoOpReason::UnknownItem));
    };
    if active.group_key != request.group_key || target.group() != &request.group_key {
        warn!(item = %request.item_id, target = ?target, "Drop target outside the dragged item's group, ignoring");
        return Ok(CommitOutcome::NoOp(NoOpReason::ForeignGroup));
    }

    match target {
        DropTarget::Trash { .. } => delete(store, request, persistence, confirm, now).await,
        DropTarget::Item { id, .. } => reorder(store, request, id, persistence, now).await,
    }
}

async fn delete<P, C>(
    store: &mut ItemStore,
    request: &CommitRequest,
    persistence: &P,
    confirm: &C,
    now: DateTime<Utc>,
) -> Result<CommitOutcome, CommitError>
where
    P: Persistence + ?Sized,
    C: Confirm + ?Sized,
{
    let title = store
        .get(&request.item_id)
        .map(|item| item.title.clone())
        .unwrap_or_default();

    if !confirm.confirm_destructive(&format!("Delete '{}'?", title)) {
        info!(item = %request.item_id, "Delete declined");
        return Ok(CommitOutcome::Declined);
    }

    persistence
        .persist_delete(&request.item_id)
        .await
        .map_err(|source| fail(CommitOp::Delete, &request.item_id, source))?;

    let Some((item, selection)) = store.remove(&request.item_id) else {
        return Ok(CommitOutcome::NoOp(NoOpReason::UnknownItem));
    };
    info!(item = %item.id, group = %item.group_key, "Deleted timetable");

    // Close the gap left behind.
    let remaining: Vec<Item> = store
        .group(&request.group_key)
        .into_iter()
        .cloned()
        .collect();
    let changed: Vec<Item> = renumber(remaining.clone(), now)
        .into_iter()
        .zip(remaining.iter())
        .filter(|(updated, before)| updated.position != before.position)
        .map(|(updated, _)| updated)
        .collect();

    if !changed.is_empty() {
        persistence
            .persist_reorder(&changed)
            .await
            .map_err(|source| fail(CommitOp::Reorder, &request.item_id, source))?;
        store.apply_updates(changed);
    }

    Ok(CommitOutcome::Deleted { item, selection })
}

async fn reorder<P>(
    store: &mut ItemStore,
    request: &CommitRequest,
    over: &ItemId,
    persistence: &P,
    now: DateTime<Utc>,
) -> Result<CommitOutcome, CommitError>
where
    P: Persistence + ?Sized,
{
    if over == &request.item_id {
        return Ok(CommitOutcome::NoOp(NoOpReason::SameItem));
    }

    let planned = {
        let group = store.group(&request.group_key);
        match plan_reorder(&group, &request.item_id, over, now) {
            Some(planned) => planned,
            None => {
                warn!(item = %request.item_id, over = %over, "Reorder target not in group, ignoring");
                return Ok(CommitOutcome::NoOp(NoOpReason::UnknownTarget));
            }
        }
    };

    persistence
        .persist_reorder(&planned)
        .await
        .map_err(|source| fail(CommitOp::Reorder, &request.item_id, source))?;

    let order: Vec<ItemId> = planned.iter().map(|item| item.id.clone()).collect();
    store.apply_updates(planned);
    info!(item = %request.item_id, group = %request.group_key, "Reordered group");

    Ok(CommitOutcome::Reordered {
        group: request.group_key.clone(),
        order,
    })
}

fn fail(op: CommitOp, item: &ItemId, source: crate::model::PersistError) -> CommitError {
    error!(item = %item, %op, error = %source, "Commit failed");
    CommitError { op, source }
}

#[cfg(test)]
#[path = "commit_tests.rs"]
mod tests;
