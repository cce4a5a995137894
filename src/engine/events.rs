//! Raw pointer events and their routing into the engine.

use super::activation::PointerKind;
use super::session::{DragEngine, Layout, PointerOutcome};
use crate::model::{ItemId, Point};
use std::time::Duration;
use tracing::debug;

/// Why a gesture was abandoned. Every reason routes to `cancel()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Pointer left the input surface.
    PointerLeave,
    /// Pointer capture was lost.
    CaptureLost,
    /// OS-level cancel gesture.
    OsCancel,
    /// The drag surface was unmounted.
    Unmounted,
}

/// A pointer event as delivered by the host, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on an item card.
    Down {
        /// Card under the pointer.
        item: ItemId,
        /// Press position.
        position: Point,
        /// Input device.
        kind: PointerKind,
        /// Monotonic timestamp.
        at: Duration,
    },
    /// Pointer moved.
    Move {
        /// New position.
        position: Point,
        /// Monotonic timestamp.
        at: Duration,
    },
    /// Pointer released.
    Up,
    /// Time passed with no movement.
    Tick {
        /// Monotonic timestamp.
        at: Duration,
    },
    /// Gesture abandoned by the host.
    Cancel(CancelReason),
}

/// Route one event into `engine`.
///
/// Only a release produces something other than [`PointerOutcome::None`].
pub fn handle_pointer_event(engine: &mut DragEngine, event: PointerEvent, layout: Layout<'_>) -> PointerOutcome {
    match event {
        PointerEvent::Down { item, position, kind, at } => {
            engine.pointer_down(&item, position, kind, at, layout.store);
            PointerOutcome::None
        }
        PointerEvent::Move { position, at } => {
            engine.on_pointer_move(position, at, layout);
            PointerOutcome::None
        }
        PointerEvent::Tick { at } => {
            engine.tick(at, layout);
            PointerOutcome::None
        }
        PointerEvent::Up => engine.release(),
        PointerEvent::Cancel(reason) => {
            debug!(?reason, "Cancelling gesture");
            engine.cancel();
            PointerOutcome::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::targets::TargetRegistry;
    use crate::model::{DeviceId, GroupKey, Item, Rect};
    use crate::store::ItemStore;
    use chrono::Utc;

    fn store() -> ItemStore {
        let item = |name: &str, position| {
            Item::new(
                ItemId::new(name).unwrap(),
                DeviceId::new("dev").unwrap(),
                GroupKey::new("G").unwrap(),
                position,
                name,
                Utc::now(),
            )
        };
        ItemStore::from_items(vec![item("a", 0), item("b", 1)])
    }

    fn registry() -> TargetRegistry {
        let mut registry = TargetRegistry::new();
        let g = GroupKey::new("G").unwrap();
        registry.register_item(g.clone(), ItemId::new("a").unwrap(), Rect::new(0.0, 0.0, 200.0, 50.0));
        registry.register_item(g.clone(), ItemId::new("b").unwrap(), Rect::new(0.0, 50.0, 200.0, 50.0));
        registry.register_list(g.clone(), Rect::new(0.0, 0.0, 200.0, 100.0));
        registry.register_trash(g, Rect::new(0.0, 100.0, 200.0, 48.0));
        registry
    }

    fn down(at: u64) -> PointerEvent {
        PointerEvent::Down {
            item: ItemId::new("a").unwrap(),
            position: Point::new(100.0, 25.0),
            kind: PointerKind::Mouse,
            at: Duration::from_millis(at),
        }
    }

    #[test]
    fn every_cancel_reason_returns_to_idle() {
        let (store, registry) = (store(), registry());
        let layout = Layout { store: &store, registry: &registry, scroll_container: None };

        for reason in [
            CancelReason::PointerLeave,
            CancelReason::CaptureLost,
            CancelReason::OsCancel,
            CancelReason::Unmounted,
        ] {
            let mut engine = DragEngine::new(EngineConfig::default());
            handle_pointer_event(&mut engine, down(0), layout);
            handle_pointer_event(
                &mut engine,
                PointerEvent::Move { position: Point::new(100.0, 75.0), at: Duration::from_millis(30) },
                layout,
            );
            assert!(engine.session().is_some());

            handle_pointer_event(&mut engine, PointerEvent::Cancel(reason), layout);

            assert!(engine.is_idle(), "{:?} should cancel", reason);
        }
    }

    #[test]
    fn down_move_up_produces_commit() {
        let (store, registry) = (store(), registry());
        let layout = Layout { store: &store, registry: &registry, scroll_container: None };
        let mut engine = DragEngine::new(EngineConfig::default());

        handle_pointer_event(&mut engine, down(0), layout);
        handle_pointer_event(
            &mut engine,
            PointerEvent::Move { position: Point::new(100.0, 75.0), at: Duration::from_millis(30) },
            layout,
        );
        let outcome = handle_pointer_event(&mut engine, PointerEvent::Up, layout);

        match outcome {
            PointerOutcome::Commit(request) => {
                assert_eq!(request.item_id.as_str(), "a");
                assert_eq!(request.target.and_then(|t| t.item_id().cloned()).map(|i| i.to_string()), Some("b".into()));
            }
            other => panic!("expected commit, got {:?}", other),
        }
    }
}
