//! Acceptance tests for drag-to-reorder and drag-to-delete.
//!
//! Each test drives a [`DragController`] with raw pointer events over a
//! measured layout, exactly as a host would.
//!
//! Layout: group G holds A, B, C as 60px cards from y=100, its trash region
//! starts at y=280. Group H holds X at y=500.

use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;
use timetable_dnd::config::EngineConfig;
use timetable_dnd::engine::{
    CancelReason, CommitOutcome, DragController, GestureOutcome, PointerEvent, PointerKind,
    TrashZoneState,
};
use timetable_dnd::model::{DeviceId, DropTarget, GroupKey, Item, ItemId, Point, Rect};
use timetable_dnd::persistence::{Confirm, JsonFileBackend, MemoryBackend, Persistence};
use timetable_dnd::store::ItemStore;

// ===== Test Helpers =====

const CARD: f64 = 60.0;
const WIDTH: f64 = 260.0;

fn key(s: &str) -> GroupKey {
    GroupKey::new(s).expect("valid group key")
}

fn id(s: &str) -> ItemId {
    ItemId::new(s).expect("valid item id")
}

fn owner() -> DeviceId {
    DeviceId::new("device-1").expect("valid device id")
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 2, 9, 0, 0).unwrap()
}

fn make_item(name: &str, group: &str, position: u32, minute: u32) -> Item {
    Item::new(
        id(name),
        owner(),
        key(group),
        position,
        format!("Plan {}", name),
        Utc.with_ymd_and_hms(2025, 8, 1, 10, minute, 0).unwrap(),
    )
}

fn records() -> Vec<Item> {
    vec![
        make_item("A", "G", 0, 1),
        make_item("B", "G", 1, 2),
        make_item("C", "G", 2, 3),
        make_item("X", "H", 0, 4),
    ]
}

fn card_center(index: usize) -> Point {
    Point::new(WIDTH / 2.0, 100.0 + index as f64 * CARD + CARD / 2.0)
}

async fn controller<P: Persistence, C: Confirm>(persistence: P, confirm: C) -> DragController<P, C> {
    let mut controller = DragController::new(EngineConfig::default(), persistence, confirm, owner());
    controller.load(None, now()).await.expect("load succeeds");

    controller.set_scroll_container(Some(Rect::new(0.0, 0.0, 400.0, 800.0)));
    let registry = controller.registry_mut();
    registry.clear();
    for (i, name) in ["A", "B", "C"].iter().enumerate() {
        registry.register_item(key("G"), id(name), Rect::new(0.0, 100.0 + i as f64 * CARD, WIDTH, CARD));
    }
    registry.register_list(key("G"), Rect::new(0.0, 100.0, WIDTH, 3.0 * CARD));
    registry.register_trash(key("G"), Rect::new(0.0, 280.0, WIDTH, 48.0));
    registry.register_item(key("H"), id("X"), Rect::new(0.0, 500.0, WIDTH, CARD));
    registry.register_list(key("H"), Rect::new(0.0, 500.0, WIDTH, CARD));
    registry.register_trash(key("H"), Rect::new(0.0, 560.0, WIDTH, 0.0));
    controller
}

/// Press on `item` and move the pointer through `path`.
async fn drag<P: Persistence, C: Confirm>(
    controller: &mut DragController<P, C>,
    item: &str,
    from: Point,
    path: &[Point],
) {
    let down = PointerEvent::Down {
        item: id(item),
        position: from,
        kind: PointerKind::Mouse,
        at: Duration::ZERO,
    };
    controller.handle_event(down, now()).await.expect("press");
    for (step, position) in path.iter().enumerate() {
        let event = PointerEvent::Move {
            position: *position,
            at: Duration::from_millis(16 * (step as u64 + 1)),
        };
        controller.handle_event(event, now()).await.expect("move");
    }
}

fn order(store: &ItemStore, group: &str) -> Vec<(String, u32)> {
    store
        .group(&key(group))
        .iter()
        .map(|i| (i.id.to_string(), i.position))
        .collect()
}

fn expect(list: &[(&str, u32)]) -> Vec<(String, u32)> {
    list.iter().map(|(n, p)| (n.to_string(), *p)).collect()
}

/// One line per group in display order: `G: B#0 C#1 A#2`.
fn render(store: &ItemStore) -> String {
    store
        .groups()
        .iter()
        .map(|group| {
            let cells: Vec<String> = group
                .items
                .iter()
                .map(|item| format!("{}#{}", item.id, item.position))
                .collect();
            format!("{}: {}", group.key, cells.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===== Reorder =====

#[tokio::test]
async fn drag_first_onto_last_reorders_group() {
    // GIVEN: G = [A(0), B(1), C(2)]
    let mut controller = controller(MemoryBackend::new(records()), |_: &str| true).await;

    // WHEN: A is dragged down over C and released
    drag(&mut controller, "A", card_center(0), &[card_center(1), card_center(2)]).await;
    let outcome = controller.pointer_up(now()).await.expect("commit succeeds");

    // THEN: G = [B(0), C(1), A(2)], H untouched
    assert!(matches!(outcome, GestureOutcome::Committed(CommitOutcome::Reordered { .. })));
    assert_eq!(order(controller.store(), "G"), expect(&[("B", 0), ("C", 1), ("A", 2)]));
    insta::assert_snapshot!(render(controller.store()), @r"
    H: X#0
    G: B#0 C#1 A#2
    ");

    let persisted = ItemStore::from_items(controller.persistence().snapshot().await);
    assert_eq!(order(&persisted, "G"), expect(&[("B", 0), ("C", 1), ("A", 2)]));
}

#[tokio::test]
async fn release_over_nothing_changes_nothing() {
    // GIVEN: a layout with no item cells registered at all
    let mut controller = controller(MemoryBackend::new(records()), |_: &str| true).await;
    controller.registry_mut().clear();
    let before = controller.store().clone();

    // WHEN: A is dragged and released
    drag(&mut controller, "A", card_center(0), &[card_center(2)]).await;
    let outcome = controller.pointer_up(now()).await.expect("no-op commit");

    // THEN: no-op, nothing persisted
    assert!(matches!(outcome, GestureOutcome::Committed(CommitOutcome::NoOp(_))));
    assert_eq!(controller.store(), &before);
    assert_eq!(controller.persistence().reorder_calls(), 0);
}

// ===== Delete =====

#[tokio::test]
async fn drag_onto_trash_and_confirm_deletes() {
    // GIVEN: G = [A(0), B(1)]
    let two = vec![make_item("A", "G", 0, 1), make_item("B", "G", 1, 2)];
    let mut controller = controller(MemoryBackend::new(two), |_: &str| true).await;

    // WHEN: A is dragged into the trash band and the delete is confirmed
    drag(&mut controller, "A", card_center(0), &[card_center(1), Point::new(130.0, 300.0)]).await;
    assert_eq!(
        controller.frame().groups.iter().find(|g| g.key == key("G")).map(|g| g.trash),
        Some(TrashZoneState::Expanded)
    );
    let outcome = controller.pointer_up(now()).await.expect("commit succeeds");

    // THEN: G = [B(0)]
    assert!(matches!(outcome, GestureOutcome::Committed(CommitOutcome::Deleted { .. })));
    assert_eq!(order(controller.store(), "G"), expect(&[("B", 0)]));
    let persisted = ItemStore::from_items(controller.persistence().snapshot().await);
    assert_eq!(order(&persisted, "G"), expect(&[("B", 0)]));
}

#[tokio::test]
async fn fast_overshoot_still_deletes() {
    // GIVEN: G = [A, B, C]
    let mut controller = controller(MemoryBackend::new(records()), |_: &str| true).await;

    // WHEN: C is flung far below the trash region in a single sample
    drag(&mut controller, "C", card_center(2), &[Point::new(40.0, 5_000.0)]).await;
    let outcome = controller.pointer_up(now()).await.expect("commit succeeds");

    // THEN: C is gone, A and B keep their positions
    assert!(matches!(outcome, GestureOutcome::Committed(CommitOutcome::Deleted { .. })));
    assert_eq!(order(controller.store(), "G"), expect(&[("A", 0), ("B", 1)]));
}

#[tokio::test]
async fn declining_delete_keeps_store() {
    // GIVEN: G = [A(0), B(1)]
    let two = vec![make_item("A", "G", 0, 1), make_item("B", "G", 1, 2)];
    let mut controller = controller(MemoryBackend::new(two), |_: &str| false).await;
    let before = controller.store().clone();

    // WHEN: A is released over the trash and the user declines
    drag(&mut controller, "A", card_center(0), &[Point::new(130.0, 300.0)]).await;
    let outcome = controller.pointer_up(now()).await.expect("decline is not an error");

    // THEN: nothing changed
    assert_eq!(outcome, GestureOutcome::Committed(CommitOutcome::Declined));
    assert_eq!(controller.store(), &before);
    assert_eq!(order(controller.store(), "G"), expect(&[("A", 0), ("B", 1)]));
}

// ===== Cancel =====

#[tokio::test]
async fn cancel_mid_drag_then_next_drag_starts_clean() {
    // GIVEN: a drag of A hovering the trash
    let mut controller = controller(MemoryBackend::new(records()), |_: &str| true).await;
    let before = controller.store().clone();
    drag(&mut controller, "A", card_center(0), &[Point::new(130.0, 300.0)]).await;

    // WHEN: pointer capture is lost
    controller.cancel(CancelReason::CaptureLost).await;

    // THEN: store unchanged, session gone
    assert_eq!(controller.store(), &before);
    assert!(controller.engine().is_idle());
    assert!(controller.frame().scroll_enabled);

    // AND: a new drag on another item works end to end
    drag(&mut controller, "B", card_center(1), &[card_center(0)]).await;
    assert_eq!(
        controller.engine().session().and_then(|s| s.current_target.clone()),
        Some(DropTarget::Item { id: id("A"), group: key("G") })
    );
    controller.pointer_up(now()).await.expect("commit succeeds");
    assert_eq!(order(controller.store(), "G"), expect(&[("B", 0), ("A", 1), ("C", 2)]));
}

// ===== Failure =====

#[tokio::test]
async fn persistence_failure_surfaces_and_store_matches_backend() {
    // GIVEN: a backend that rejects reorders
    let backend = MemoryBackend::new(records());
    backend.set_fail_reorder(true);
    let mut controller = controller(backend, |_: &str| true).await;

    // WHEN: A is dropped on B
    drag(&mut controller, "A", card_center(0), &[card_center(1)]).await;
    let result = controller.pointer_up(now()).await;

    // THEN: the error reaches the caller and the store shows the stored order
    assert!(result.is_err());
    assert_eq!(order(controller.store(), "G"), expect(&[("A", 0), ("B", 1), ("C", 2)]));

    // AND: the item can be dragged again once the backend recovers
    controller.persistence().set_fail_reorder(false);
    drag(&mut controller, "A", card_center(0), &[card_center(1)]).await;
    controller.pointer_up(now()).await.expect("commit succeeds");
    assert_eq!(order(controller.store(), "G"), expect(&[("B", 0), ("A", 1), ("C", 2)]));
}

// ===== JSON file backend =====

#[tokio::test]
async fn json_backend_round_trips_a_reorder() {
    // GIVEN: a JSON document seeded with G and H
    let dir = std::env::temp_dir().join(format!("timetable_dnd_acceptance_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("timetables.json");
    let backend = JsonFileBackend::new(&path);
    backend.persist_reorder(&records()).await.expect("seed document");

    // WHEN: C is dragged onto A
    let mut controller = controller(backend, |_: &str| true).await;
    drag(&mut controller, "C", card_center(2), &[card_center(1), card_center(0)]).await;
    controller.pointer_up(now()).await.expect("commit succeeds");

    // THEN: a fresh backend on the same file sees the new order
    let reopened = JsonFileBackend::new(&path);
    let loaded = ItemStore::from_items(reopened.load_items(&owner()).await.expect("load"));
    assert_eq!(order(&loaded, "G"), expect(&[("C", 0), ("A", 1), ("B", 2)]));
    assert_eq!(order(&loaded, "H"), expect(&[("X", 0)]));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn json_backend_missing_file_loads_empty() {
    let path = std::env::temp_dir().join(format!("timetable_dnd_missing_{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let items = JsonFileBackend::new(&path).load_items(&owner()).await.expect("load");

    assert!(items.is_empty());
}
