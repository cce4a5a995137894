//! Property-based tests for the drag engine invariants.
//!
//! Tests validate:
//! 1. Groups stay contiguous after any sequence of commits
//! 2. The resolver never reports another group's item
//! 3. Overshoot resolves to the trash however far past the edge
//! 4. The scroll gate flips exactly at the hot-zone edge
//! 5. A gesture always ends before the next press is accepted

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::time::Duration;
use timetable_dnd::config::EngineConfig;
use timetable_dnd::engine::{
    commit, handle_pointer_event, resolve_collision, scroll_allowed, CollisionInput, CommitRequest,
    DragEngine, Layout, PointerEvent, PointerKind, PointerOutcome, TargetRegistry,
};
use timetable_dnd::model::{DeviceId, DropTarget, GroupKey, Item, ItemId, Point, Rect};
use timetable_dnd::persistence::{AutoConfirm, MemoryBackend};
use timetable_dnd::store::ItemStore;

// ===== Helpers =====

fn key(s: &str) -> GroupKey {
    GroupKey::new(s).unwrap()
}

fn id(s: String) -> ItemId {
    ItemId::new(s).unwrap()
}

fn group_items(group: &str, n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| {
            Item::new(
                id(format!("{}{}", group, i)),
                DeviceId::new("dev").unwrap(),
                key(group),
                i as u32,
                format!("{} {}", group, i),
                Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, i as u32).unwrap(),
            )
        })
        .collect()
}

/// Two groups side by side: G in the left column, H in the right one.
fn two_column_registry(g_count: usize, h_count: usize) -> TargetRegistry {
    let mut registry = TargetRegistry::new();
    for (group, count, left) in [("G", g_count, 0.0), ("H", h_count, 300.0)] {
        for i in 0..count {
            registry.register_item(
                key(group),
                id(format!("{}{}", group, i)),
                Rect::new(left, 100.0 + i as f64 * 50.0, 250.0, 50.0),
            );
        }
        let bottom = 100.0 + count as f64 * 50.0;
        registry.register_list(key(group), Rect::new(left, 100.0, 250.0, count as f64 * 50.0));
        registry.register_trash(key(group), Rect::new(left, bottom, 250.0, 48.0));
    }
    registry
}

#[derive(Debug, Clone)]
enum Op {
    Reorder(usize, usize),
    Delete(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Reorder(a, b)),
        (0usize..8).prop_map(Op::Delete),
    ]
}

// ===== Property 1: Contiguity =====

proptest! {
    #[test]
    fn groups_stay_contiguous_after_commits(
        n in 1usize..7,
        ops in prop::collection::vec(op_strategy(), 1..12),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let records = group_items("G", n);
        let backend = MemoryBackend::new(records.clone());
        let mut store = ItemStore::from_items(records);
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        for op in ops {
            let group = store.group(&key("G"));
            if group.is_empty() {
                break;
            }
            let pick = |i: usize| group[i % group.len()].id.clone();
            let request = match op {
                Op::Reorder(a, b) => CommitRequest {
                    item_id: pick(a),
                    group_key: key("G"),
                    target: Some(DropTarget::Item { id: pick(b), group: key("G") }),
                },
                Op::Delete(a) => CommitRequest {
                    item_id: pick(a),
                    group_key: key("G"),
                    target: Some(DropTarget::Trash { group: key("G") }),
                },
            };

            runtime
                .block_on(commit(&mut store, &request, &backend, &AutoConfirm(true), now))
                .unwrap();

            prop_assert!(store.is_contiguous(&key("G")), "gap after {:?}", request);
            let persisted = ItemStore::from_items(runtime.block_on(backend.snapshot()));
            prop_assert!(persisted.is_contiguous(&key("G")));
        }
    }
}

// ===== Property 2: No cross-group leakage =====

proptest! {
    #[test]
    fn resolver_never_leaves_active_group(
        g_count in 1usize..6,
        h_count in 1usize..6,
        x in -200.0f64..800.0,
        y in -200.0f64..800.0,
        cx in -200.0f64..800.0,
        cy in -200.0f64..800.0,
        drag_h in any::<bool>(),
    ) {
        let registry = two_column_registry(g_count, h_count);
        let active = if drag_h { key("H") } else { key("G") };

        let target = resolve_collision(
            CollisionInput {
                pointer: Point::new(x, y),
                active_group: &active,
                dragged_center: Point::new(cx, cy),
            },
            &registry,
        );

        if let Some(target) = target {
            prop_assert_eq!(target.group(), &active);
        }
    }
}

// ===== Property 3: Overshoot idempotence =====

proptest! {
    #[test]
    fn any_depth_past_trash_bottom_is_trash(
        count in 1usize..6,
        x in 0.0f64..=250.0,
        past in 0.001f64..1.0e7,
    ) {
        let registry = two_column_registry(count, 1);
        let trash = registry.trash(&key("G")).unwrap();

        let target = resolve_collision(
            CollisionInput {
                pointer: Point::new(x, trash.bottom() + past),
                active_group: &key("G"),
                dragged_center: Point::new(125.0, 125.0),
            },
            &registry,
        );

        prop_assert_eq!(target, Some(DropTarget::Trash { group: key("G") }));
    }
}

// ===== Property 4: Scroll gate boundary =====

proptest! {
    #[test]
    fn scroll_gate_flips_at_hot_zone_edge(
        height in 200.0f64..3000.0,
        hot_zone in 1.0f64..150.0,
        margin in 0.5f64..50.0,
    ) {
        let container = Rect::new(0.0, 0.0, 400.0, height);
        let trash = DropTarget::Trash { group: key("G") };
        let edge = height - hot_zone;

        prop_assert!(!scroll_allowed(Some(&trash), edge - margin, Some(container), hot_zone));
        prop_assert!(scroll_allowed(Some(&trash), edge + margin.min(hot_zone / 2.0), Some(container), hot_zone));
        prop_assert!(scroll_allowed(None, edge - margin, Some(container), hot_zone));
    }
}

// ===== Property 5: Session lifecycle =====

#[derive(Debug, Clone)]
enum Gesture {
    Down(usize, f64),
    Move(f64, f64),
    Up,
    Cancel,
}

fn gesture_strategy() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (0usize..4, 100.0f64..300.0).prop_map(|(i, y)| Gesture::Down(i, y)),
        (0.0f64..260.0, 0.0f64..600.0).prop_map(|(x, y)| Gesture::Move(x, y)),
        Just(Gesture::Up),
        Just(Gesture::Cancel),
    ]
}

proptest! {
    #[test]
    fn gesture_always_ends_before_next_press(gestures in prop::collection::vec(gesture_strategy(), 1..40)) {
        let items = group_items("G", 4);
        let store = ItemStore::from_items(items);
        let registry = two_column_registry(4, 0);
        let layout = Layout { store: &store, registry: &registry, scroll_container: None };
        let mut engine = DragEngine::new(EngineConfig::default());

        for (step, gesture) in gestures.into_iter().enumerate() {
            let at = Duration::from_millis(step as u64 * 16);
            let was_idle = engine.is_idle();
            let event = match gesture {
                Gesture::Down(i, y) => PointerEvent::Down {
                    item: id(format!("G{}", i)),
                    position: Point::new(125.0, y),
                    kind: PointerKind::Mouse,
                    at,
                },
                Gesture::Move(x, y) => PointerEvent::Move { position: Point::new(x, y), at },
                Gesture::Up => PointerEvent::Up,
                Gesture::Cancel => PointerEvent::Cancel(timetable_dnd::engine::CancelReason::PointerLeave),
            };
            let is_down = matches!(event, PointerEvent::Down { .. });
            let ends = matches!(event, PointerEvent::Up | PointerEvent::Cancel(_));
            let before = engine.phase().clone();

            let outcome = handle_pointer_event(&mut engine, event, layout);
            if let PointerOutcome::Commit(request) = outcome {
                engine.commit_finished(&request.item_id);
            }

            if ends {
                prop_assert!(engine.is_idle());
            }
            if is_down && !was_idle {
                prop_assert_eq!(engine.phase(), &before, "press accepted mid-gesture");
            }
        }
    }
}
