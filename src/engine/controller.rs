//! Drag controller: the engine wired to its store and collaborators.
//!
//! The host forwards pointer events and awaits releases. The controller owns
//! everything a gesture touches, so the commit for one gesture always runs
//! before the next event is processed.

use super::commit::{commit, CommitOutcome};
use super::events::{handle_pointer_event, CancelReason, PointerEvent};
use super::session::{DragEngine, DragFrame, Layout, PointerOutcome};
use super::targets::TargetRegistry;
use crate::config::EngineConfig;
use crate::model::{CommitError, DeviceId, EngineError, ItemId, Rect};
use crate::persistence::{Confirm, Persistence};
use crate::store::{initial_selection, ItemStore};
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// What a pointer event amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Nothing to report.
    Nothing,
    /// A click displayed this item.
    Selected(ItemId),
    /// A drag was committed (possibly as a no-op).
    Committed(CommitOutcome),
}

/// Drag engine plus the store, registry and collaborators it acts on.
pub struct DragController<P, C> {
    engine: DragEngine,
    store: ItemStore,
    registry: TargetRegistry,
    persistence: P,
    confirm: C,
    owner: DeviceId,
    scroll_container: Option<Rect>,
}

impl<P, C> DragController<P, C>
where
    P: Persistence,
    C: Confirm,
{
    /// Empty controller; call [`load`](Self::load) before the first gesture.
    pub fn new(config: EngineConfig, persistence: P, confirm: C, owner: DeviceId) -> Self {
        Self {
            engine: DragEngine::new(config),
            store: ItemStore::new(),
            registry: TargetRegistry::new(),
            persistence,
            confirm,
            owner,
            scroll_container: None,
        }
    }

    /// Populate the store from the collaborator and pick the displayed item.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the selection window is out of
    /// range, before anything is loaded. Otherwise returns the collaborator's
    /// error; the store is unchanged in that case.
    pub async fn load(
        &mut self,
        last_viewed: Option<&ItemId>,
        now: DateTime<Utc>,
    ) -> Result<Option<ItemId>, EngineError> {
        let window = self.engine.config().just_created_window()?;
        self.store.reload(&self.persistence, &self.owner).await?;

        let selected = initial_selection(self.store.items(), last_viewed, now, window);
        match &selected {
            Some(id) => {
                self.store.select(id);
            }
            None => self.store.clear_selection(),
        }
        Ok(selected)
    }

    /// The gesture state machine.
    pub fn engine(&self) -> &DragEngine {
        &self.engine
    }

    /// Items as last loaded or committed.
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Persistence collaborator.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Registry to refill on each layout pass.
    pub fn registry_mut(&mut self) -> &mut TargetRegistry {
        &mut self.registry
    }

    /// Visible rect of the scrolling list, if measured.
    pub fn set_scroll_container(&mut self, rect: Option<Rect>) {
        self.scroll_container = rect;
    }

    /// Snapshot for the rendering layer.
    pub fn frame(&self) -> DragFrame {
        self.engine.frame(&self.store)
    }

    /// Process one pointer event, committing on release.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError`] when a release's commit could not be persisted.
    /// The store has been reloaded from the collaborator by then.
    pub async fn handle_event(&mut self, event: PointerEvent, now: DateTime<Utc>) -> Result<GestureOutcome, CommitError> {
        let layout = Layout {
            store: &self.store,
            registry: &self.registry,
            scroll_container: self.scroll_container,
        };

        match handle_pointer_event(&mut self.engine, event, layout) {
            PointerOutcome::None => Ok(GestureOutcome::Nothing),
            PointerOutcome::Click(id) => {
                if self.store.select(&id) {
                    Ok(GestureOutcome::Selected(id))
                } else {
                    Ok(GestureOutcome::Nothing)
                }
            }
            PointerOutcome::Commit(request) => {
                let result = commit(&mut self.store, &request, &self.persistence, &self.confirm, now).await;
                self.engine.commit_finished(&request.item_id);

                match result {
                    Ok(outcome) => Ok(GestureOutcome::Committed(outcome)),
                    Err(err) => {
                        self.reconcile().await;
                        Err(err)
                    }
                }
            }
        }
    }

    /// Release the pointer; shorthand for [`handle_event`](Self::handle_event).
    ///
    /// # Errors
    ///
    /// Same as [`handle_event`](Self::handle_event).
    pub async fn pointer_up(&mut self, now: DateTime<Utc>) -> Result<GestureOutcome, CommitError> {
        self.handle_event(PointerEvent::Up, now).await
    }

    /// Abandon the current gesture without committing.
    pub async fn cancel(&mut self, reason: CancelReason) {
        // Cancel never commits, so there is nothing to fail.
        let _ = self.handle_event(PointerEvent::Cancel(reason), Utc::now()).await;
    }

    /// Pull the authoritative state after a failed commit.
    async fn reconcile(&mut self) {
        match self.store.reload(&self.persistence, &self.owner).await {
            Ok(()) => info!(owner = %self.owner, "Store reconciled after failed commit"),
            Err(err) => error!(owner = %self.owner, error = %err, "Reload after failed commit also failed"),
        }
    }
}
