//! Drag session state machine.
//!
//! `Idle → Pressed → Dragging → Idle`. Every pointer move in `Dragging`
//! recomputes, in this order, the winning target (resolver), the corrected
//! transform (motion constraint) and the scroll permission (gate). The session
//! reads the item store and the target registry but never writes to either;
//! the commit handler is the only writer.
//!
//! Invalid transitions never escape: the public methods log them and report
//! `false`/`None`.

use super::activation::{check_activation, ActivationCheck, PendingPress, PointerKind};
use super::collision::{resolve_collision, CollisionInput};
use super::motion::constrain_to_group;
use super::scroll_gate::scroll_allowed;
use super::targets::{TargetRegistry, TrashZoneState};
use crate::config::EngineConfig;
use crate::model::{DropTarget, GroupKey, ItemId, Point, Rect, Transform, TransitionError};
use crate::store::ItemStore;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Read-only inputs a pointer sample is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    /// Current records.
    pub store: &'a ItemStore,
    /// Rects measured on the last layout pass.
    pub registry: &'a TargetRegistry,
    /// Visible rect of the ancestor scroll container.
    pub scroll_container: Option<Rect>,
}

/// Transient state of one drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Item being dragged.
    pub active_item: ItemId,
    /// Its group; the only one that can receive the drop.
    pub active_group: GroupKey,
    /// Pointer position the raw transform is measured from.
    pub origin: Point,
    /// Latest pointer sample.
    pub last_pointer: Point,
    /// Winning target of the latest sample.
    pub current_target: Option<DropTarget>,
    /// Whether the ancestor container may auto-scroll.
    pub scroll_enabled: bool,
    /// Set on the sample where the pointer moves onto the trash from
    /// elsewhere; cleared on the next sample. Hosts use it for haptics.
    pub trash_entered: bool,
    /// Corrected visual offset of the dragged card.
    pub transform: Transform,
    /// The card's rect when the drag started.
    pub resting_rect: Option<Rect>,
}

/// Where the engine is in the gesture lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragPhase {
    /// No gesture.
    #[default]
    Idle,
    /// Pointer is down on an item but activation has not fired yet.
    Pressed(PendingPress),
    /// A drag is open.
    Dragging(DragSession),
}

/// What a finished drag asks the commit handler to do.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest {
    /// Dragged item.
    pub item_id: ItemId,
    /// Its group when the drag started.
    pub group_key: GroupKey,
    /// `None` means released over nothing.
    pub target: Option<DropTarget>,
}

/// Result of a pointer release.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// Nothing was open.
    None,
    /// The press never became a drag.
    Click(ItemId),
    /// A drag ended; the request must be committed and then reported back
    /// through [`DragEngine::commit_finished`].
    Commit(CommitRequest),
}

/// Per-group rendering state.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFrame {
    /// Group the state applies to.
    pub key: GroupKey,
    /// Trash region layout.
    pub trash: TrashZoneState,
    /// Height to give the trash region.
    pub trash_height: f64,
    /// Another group is being dragged in.
    pub disabled: bool,
}

/// Snapshot for the rendering layer, recomputed per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DragFrame {
    /// Item being dragged, if any.
    pub active_item: Option<ItemId>,
    /// Target to highlight.
    pub current_target: Option<DropTarget>,
    /// Whether the ancestor container may auto-scroll. Always true when idle.
    pub scroll_enabled: bool,
    /// Pointer just moved onto the trash this sample.
    pub trash_entered: bool,
    /// Offset to apply to the dragged card.
    pub transform: Transform,
    /// One entry per group in display order.
    pub groups: Vec<GroupFrame>,
}

/// The pointer-driven drag engine.
#[derive(Debug, Clone)]
pub struct DragEngine {
    config: EngineConfig,
    phase: DragPhase,
    in_flight: HashSet<ItemId>,
}

impl DragEngine {
    /// Idle engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            phase: DragPhase::Idle,
            in_flight: HashSet::new(),
        }
    }

    /// Tunables in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// Whether no press or drag is open.
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    /// The open drag session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    // ===== Gesture start =====

    /// Record a press on `item`. Valid only from `Idle`.
    pub fn pointer_down(
        &mut self,
        item: &ItemId,
        position: Point,
        kind: PointerKind,
        at: Duration,
        store: &ItemStore,
    ) -> bool {
        let result = self.try_pointer_down(item, position, kind, at, store);
        log_rejection("pointer_down", result)
    }

    fn try_pointer_down(
        &mut self,
        item: &ItemId,
        position: Point,
        kind: PointerKind,
        at: Duration,
        store: &ItemStore,
    ) -> Result<(), TransitionError> {
        if !self.is_idle() {
            return Err(TransitionError::GestureInProgress);
        }
        self.check_startable(item, store)?;

        debug!(item = %item, ?kind, "Press recorded");
        self.phase = DragPhase::Pressed(PendingPress {
            item_id: item.clone(),
            kind,
            origin: position,
            pressed_at: at,
        });
        Ok(())
    }

    /// Start dragging `item` with the pointer at `pointer`.
    ///
    /// Valid from `Idle`, or from `Pressed` on the same item. Programmatic
    /// callers can skip the press entirely.
    pub fn start(&mut self, item: &ItemId, pointer: Point, layout: Layout<'_>) -> bool {
        let result = self.try_start(item, pointer, layout);
        log_rejection("start", result)
    }

    fn try_start(&mut self, item: &ItemId, pointer: Point, layout: Layout<'_>) -> Result<(), TransitionError> {
        match &self.phase {
            DragPhase::Idle => {}
            DragPhase::Pressed(press) if &press.item_id == item => {}
            _ => return Err(TransitionError::GestureInProgress),
        }
        let group = self.check_startable(item, layout.store)?;

        info!(item = %item, group = %group, "Drag started");
        self.phase = DragPhase::Dragging(DragSession {
            active_item: item.clone(),
            active_group: group,
            origin: pointer,
            last_pointer: pointer,
            current_target: None,
            scroll_enabled: true,
            trash_entered: false,
            transform: Transform::IDENTITY,
            resting_rect: layout.registry.item_rect(item),
        });
        Ok(())
    }

    fn check_startable(&self, item: &ItemId, store: &ItemStore) -> Result<GroupKey, TransitionError> {
        if self.in_flight.contains(item) {
            return Err(TransitionError::CommitInFlight(item.clone()));
        }
        store
            .get(item)
            .map(|record| record.group_key.clone())
            .ok_or_else(|| TransitionError::UnknownItem(item.clone()))
    }

    // ===== Pointer samples =====

    /// Feed a pointer move.
    ///
    /// A pending press may activate (or abort); an open drag recomputes its
    /// target, transform and scroll permission.
    pub fn on_pointer_move(&mut self, position: Point, at: Duration, layout: Layout<'_>) -> bool {
        let result = self.try_pointer_move(position, at, layout);
        log_rejection("pointer_move", result)
    }

    fn try_pointer_move(&mut self, position: Point, at: Duration, layout: Layout<'_>) -> Result<(), TransitionError> {
        match &self.phase {
            DragPhase::Idle => Err(TransitionError::NoGesture),
            DragPhase::Pressed(press) => {
                match check_activation(press, position, at, &self.config) {
                    ActivationCheck::Waiting => {}
                    ActivationCheck::Abort => {
                        debug!(item = %press.item_id, "Touch press moved before activation, released to page");
                        self.phase = DragPhase::Idle;
                    }
                    ActivationCheck::Activate => {
                        let (item, origin) = (press.item_id.clone(), press.origin);
                        if let Err(err) = self.try_start(&item, origin, layout) {
                            self.phase = DragPhase::Idle;
                            return Err(err);
                        }
                        self.recompute(position, layout);
                    }
                }
                Ok(())
            }
            DragPhase::Dragging(_) => {
                self.recompute(position, layout);
                Ok(())
            }
        }
    }

    /// Advance time without movement, so a touch hold can activate.
    pub fn tick(&mut self, at: Duration, layout: Layout<'_>) -> bool {
        let press = match &self.phase {
            DragPhase::Pressed(press) => press.clone(),
            _ => return false,
        };
        if check_activation(&press, press.origin, at, &self.config) != ActivationCheck::Activate {
            return false;
        }
        let result = self.try_start(&press.item_id, press.origin, layout);
        if result.is_err() {
            self.phase = DragPhase::Idle;
        }
        log_rejection("tick", result)
    }

    /// Resolver, then motion constraint, then scroll gate.
    fn recompute(&mut self, position: Point, layout: Layout<'_>) {
        let DragPhase::Dragging(session) = &mut self.phase else {
            return;
        };

        let raw = Transform::between(session.origin, position);
        let dragged_center = session
            .resting_rect
            .map(|rect| rect.translated(Transform::new(0.0, raw.y)).center())
            .unwrap_or(position);

        let target = resolve_collision(
            CollisionInput {
                pointer: position,
                active_group: &session.active_group,
                dragged_center,
            },
            layout.registry,
        );

        let transform = constrain_to_group(
            raw,
            session.resting_rect,
            layout.registry.list(&session.active_group),
            self.config.trash_half_height_px,
        );

        let scroll_enabled = scroll_allowed(
            target.as_ref(),
            position.y,
            layout.scroll_container,
            self.config.hot_zone_px,
        );

        if target != session.current_target {
            debug!(item = %session.active_item, target = ?target, "Drop target changed");
        }
        session.trash_entered = target.as_ref().is_some_and(DropTarget::is_trash)
            && !session.current_target.as_ref().is_some_and(DropTarget::is_trash);
        session.last_pointer = position;
        session.current_target = target;
        session.transform = transform;
        session.scroll_enabled = scroll_enabled;
    }

    // ===== Gesture end =====

    /// End the drag with `final_target`. Valid only while dragging.
    ///
    /// The session is discarded unconditionally and the item is marked as
    /// committing until [`commit_finished`](Self::commit_finished).
    pub fn end(&mut self, final_target: Option<DropTarget>) -> Option<CommitRequest> {
        match self.try_end(final_target) {
            Ok(request) => Some(request),
            Err(err) => {
                log_rejection::<()>("end", Err(err));
                None
            }
        }
    }

    fn try_end(&mut self, final_target: Option<DropTarget>) -> Result<CommitRequest, TransitionError> {
        let session = match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(session) => session,
            other => {
                self.phase = other;
                return Err(TransitionError::NoGesture);
            }
        };

        info!(item = %session.active_item, target = ?final_target, "Drag ended");
        self.in_flight.insert(session.active_item.clone());
        Ok(CommitRequest {
            item_id: session.active_item,
            group_key: session.active_group,
            target: final_target,
        })
    }

    /// Pointer released: a click for an unactivated press, a commit request
    /// (with the last resolved target) for a drag.
    pub fn release(&mut self) -> PointerOutcome {
        match &self.phase {
            DragPhase::Idle => {
                debug!("Release with no gesture, ignored");
                PointerOutcome::None
            }
            DragPhase::Pressed(press) => {
                let item = press.item_id.clone();
                self.phase = DragPhase::Idle;
                PointerOutcome::Click(item)
            }
            DragPhase::Dragging(session) => {
                let target = session.current_target.clone();
                match self.end(target) {
                    Some(request) => PointerOutcome::Commit(request),
                    None => PointerOutcome::None,
                }
            }
        }
    }

    /// Abandon any open press or drag without committing anything.
    ///
    /// Returns whether there was something to cancel.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => {
                debug!("Cancel with no gesture, ignored");
                false
            }
            DragPhase::Pressed(press) => {
                debug!(item = %press.item_id, "Press cancelled");
                true
            }
            DragPhase::Dragging(session) => {
                info!(item = %session.active_item, "Drag cancelled");
                true
            }
        }
    }

    // ===== Commit tracking =====

    /// The commit for `item` has settled (either way).
    pub fn commit_finished(&mut self, item: &ItemId) {
        self.in_flight.remove(item);
    }

    /// Whether `item` is waiting on its commit.
    pub fn is_committing(&self, item: &ItemId) -> bool {
        self.in_flight.contains(item)
    }

    // ===== Rendering state =====

    /// How `group`'s trash region should be laid out this frame.
    pub fn trash_zone(&self, group: &GroupKey, store: &ItemStore) -> TrashZoneState {
        let Some(session) = self.session() else {
            return TrashZoneState::Hidden;
        };
        if &session.active_group != group {
            return TrashZoneState::Hidden;
        }

        let over_last_item = match &session.current_target {
            Some(DropTarget::Trash { .. }) => true,
            Some(DropTarget::Item { id, .. }) => store.last_item(group).is_some_and(|last| &last.id == id),
            None => false,
        };

        if over_last_item {
            TrashZoneState::Expanded
        } else {
            TrashZoneState::Sensor
        }
    }

    /// Whether `group` is locked because another group is being dragged in.
    pub fn is_group_disabled(&self, group: &GroupKey) -> bool {
        self.session().is_some_and(|session| &session.active_group != group)
    }

    /// Snapshot for the rendering layer.
    pub fn frame(&self, store: &ItemStore) -> DragFrame {
        let groups = store
            .group_keys()
            .into_iter()
            .map(|key| {
                let trash = self.trash_zone(key, store);
                GroupFrame {
                    key: key.clone(),
                    trash,
                    trash_height: trash.height(&self.config),
                    disabled: self.is_group_disabled(key),
                }
            })
            .collect();

        match self.session() {
            Some(session) => DragFrame {
                active_item: Some(session.active_item.clone()),
                current_target: session.current_target.clone(),
                scroll_enabled: session.scroll_enabled,
                trash_entered: session.trash_entered,
                transform: session.transform,
                groups,
            },
            None => DragFrame {
                active_item: None,
                current_target: None,
                scroll_enabled: true,
                trash_entered: false,
                transform: Transform::IDENTITY,
                groups,
            },
        }
    }
}

/// Log a rejected transition and turn the result into a flag.
fn log_rejection<T>(operation: &'static str, result: Result<T, TransitionError>) -> bool {
    match result {
        Ok(_) => true,
        Err(TransitionError::NoGesture) => {
            debug!(operation, "Ignored: no gesture in progress");
            false
        }
        Err(err) => {
            warn!(operation, error = %err, "Ignored invalid drag transition");
            false
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
