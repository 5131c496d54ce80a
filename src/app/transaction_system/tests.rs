use super::*;
use std::cell::Cell;

thread_local! {
    static EXECUTED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
}

fn executed() -> usize {
    EXECUTED.with(Cell::get)
}

fn dropped() -> usize {
    DROPPED.with(Cell::get)
}

#[derive(Debug, Default)]
struct Counter {
    value: i32,
}

const COUNTER: StoreKind = StoreKind(1);

static COUNTER_META: StoreMetadata = StoreMetadata {
    description: "Zähler",
    spawner: || Box::new(Counter::default()),
};

/// Addiert `delta` auf den Zähler; zählt Ausführungen und Freigaben.
#[derive(Debug, Default)]
struct Add {
    delta: i32,
    fail: bool,
}

impl EventPayload for Add {
    fn execute(&mut self, stores: &mut StoreRegistry) -> bool {
        EXECUTED.with(|c| c.set(c.get() + 1));
        if self.fail {
            return false;
        }
        stores.data_mut::<Counter>(COUNTER).value += self.delta;
        true
    }

    fn undo(&mut self, stores: &mut StoreRegistry) {
        stores.data_mut::<Counter>(COUNTER).value -= self.delta;
    }
}

impl Drop for Add {
    fn drop(&mut self) {
        DROPPED.with(|c| c.set(c.get() + 1));
    }
}

/// Setzt den Zähler absolut (Multi-Frame-Geste).
#[derive(Debug, Default)]
struct Drag {
    value: i32,
    value_before: i32,
    fail: bool,
}

impl EventPayload for Drag {
    fn execute(&mut self, stores: &mut StoreRegistry) -> bool {
        if self.fail {
            return false;
        }
        let counter = stores.data_mut::<Counter>(COUNTER);
        self.value_before = counter.value;
        counter.value = self.value;
        true
    }

    fn undo(&mut self, stores: &mut StoreRegistry) {
        stores.data_mut::<Counter>(COUNTER).value = self.value_before;
    }

    fn coalesce(&mut self, newer: &dyn EventPayload) {
        if let Some(newer) = newer.as_any().downcast_ref::<Drag>() {
            self.value = newer.value;
        }
    }
}

impl Drop for Drag {
    fn drop(&mut self) {
        DROPPED.with(|c| c.set(c.get() + 1));
    }
}

/// Erhöht den Zähler um eins, ohne Inverse.
#[derive(Debug, Default)]
struct Bump;

impl EventPayload for Bump {
    fn execute(&mut self, stores: &mut StoreRegistry) -> bool {
        stores.data_mut::<Counter>(COUNTER).value += 1;
        true
    }
}

const ADD: EventKind = EventKind(3);
const DRAG: EventKind = EventKind(4);
const BUMP: EventKind = EventKind(5);

static ADD_META: EventMetadata =
    EventMetadata::domain("Addieren", false, || Box::new(Add::default()));
static DRAG_META: EventMetadata =
    EventMetadata::domain("Ziehen", true, || Box::new(Drag::default()));
static BUMP_META: EventMetadata =
    EventMetadata::domain("Erhöhen", false, || Box::new(Bump));
static BROKEN_META: EventMetadata = EventMetadata {
    description: "Ohne Spawner",
    multi_frame: false,
    spawner: None,
};

fn counter_system() -> TransactionSystem {
    let mut system = TransactionSystem::new();
    system
        .spawn_store(&COUNTER_META, COUNTER)
        .expect("Zähler-Store registrierbar");
    system
}

fn value(system: &TransactionSystem) -> i32 {
    system.store_data::<Counter>(COUNTER).value
}

fn spawn_add(system: &mut TransactionSystem, delta: i32) {
    system
        .spawn_event_as::<Add>(&ADD_META, ADD)
        .expect("Add-Event")
        .delta = delta;
}

fn spawn_failing_add(system: &mut TransactionSystem) {
    system
        .spawn_event_as::<Add>(&ADD_META, ADD)
        .expect("Add-Event")
        .fail = true;
}

fn drag(system: &mut TransactionSystem, to: i32) -> EventKind {
    system
        .spawn_event_as::<Drag>(&DRAG_META, DRAG)
        .expect("Drag-Event")
        .value = to;
    system.flush().expect("Flush ohne Vertragsverletzung")
}

fn failing_drag(system: &mut TransactionSystem, to: i32) -> EventKind {
    let event = system
        .spawn_event_as::<Drag>(&DRAG_META, DRAG)
        .expect("Drag-Event");
    event.value = to;
    event.fail = true;
    system.flush().expect("Flush ohne Vertragsverletzung")
}

// ─── Flush-Grundverhalten ────────────────────────────────────────────────────

#[test]
fn empty_queue_flushes_to_noop() {
    let mut system = counter_system();
    assert_eq!(system.flush(), Ok(EventKind::NOOP));
    assert!(system.history().is_empty());
}

#[test]
fn spawned_event_runs_only_on_flush() {
    let mut system = counter_system();
    spawn_add(&mut system, 5);

    assert_eq!(value(&system), 0, "Spawn darf noch nichts ausführen");
    assert_eq!(system.pending_len(), 1);

    assert_eq!(system.flush(), Ok(ADD));
    assert_eq!(value(&system), 5);
    assert_eq!(system.pending_len(), 0);
    assert_eq!(system.history().kinds(), vec![ADD]);
}

#[test]
fn failed_event_leaves_no_trace() {
    let mut system = counter_system();
    spawn_failing_add(&mut system);

    assert_eq!(system.flush(), Ok(EventKind::NOOP));
    assert_eq!(executed(), 1);
    assert_eq!(dropped(), 1, "Payload muss sofort freigegeben werden");
    assert!(system.history().is_empty());
    assert_eq!(system.pending_len(), 0);
}

#[test]
fn multiple_ordinary_events_are_all_discarded() {
    let mut system = counter_system();
    spawn_add(&mut system, 1);
    spawn_add(&mut system, 2);
    spawn_add(&mut system, 3);

    assert_eq!(
        system.flush(),
        Err(TransactionError::MultipleEventsQueued { count: 3 })
    );
    assert_eq!(executed(), 0, "Kein Event darf ausgeführt werden");
    assert_eq!(dropped(), 3);
    assert_eq!(value(&system), 0);
    assert_eq!(system.pending_len(), 0);
    assert!(system.history().is_empty());
}

#[test]
fn on_update_swallows_contract_violation_as_noop() {
    let mut system = counter_system();
    spawn_add(&mut system, 1);
    spawn_add(&mut system, 2);

    assert_eq!(system.on_update(), EventKind::NOOP);
    assert_eq!(system.pending_len(), 0);
}

// ─── Undo/Redo-Priorität ─────────────────────────────────────────────────────

#[test]
fn undo_wins_over_ordinary_events_in_same_tick() {
    let mut system = counter_system();
    spawn_add(&mut system, 4);
    system.flush().unwrap();
    let executed_before = executed();

    spawn_add(&mut system, 10);
    system.spawn_undo();
    spawn_add(&mut system, 20);

    assert_eq!(system.flush(), Ok(EventKind::UNDO));
    assert_eq!(executed(), executed_before, "Gewöhnliche Events laufen nicht");
    assert_eq!(dropped(), 2);
    assert_eq!(value(&system), 0);
    assert_eq!(system.history().kinds(), vec![ADD, EventKind::UNDO]);
}

#[test]
fn failed_undo_discards_everything_and_is_not_recorded() {
    let mut system = counter_system();
    spawn_add(&mut system, 7);
    system.spawn_undo();

    assert_eq!(system.flush(), Ok(EventKind::NOOP));
    assert_eq!(executed(), 0);
    assert_eq!(dropped(), 1);
    assert!(system.history().is_empty());
    assert_eq!(system.pending_len(), 0);
}

#[test]
fn first_priority_event_is_selected() {
    let mut system = counter_system();
    spawn_add(&mut system, 3);
    system.flush().unwrap();
    system.spawn_undo();
    system.flush().unwrap();

    system.spawn_redo();
    system.spawn_undo();
    assert_eq!(system.flush(), Ok(EventKind::REDO));
    assert_eq!(value(&system), 3);
}

#[test]
fn undo_then_redo_reapplies_forward_mutation() {
    let mut system = counter_system();
    spawn_add(&mut system, 2);
    system.flush().unwrap();
    spawn_add(&mut system, 5);
    system.flush().unwrap();
    assert_eq!(value(&system), 7);

    system.spawn_undo();
    system.flush().unwrap();
    assert_eq!(value(&system), 2);

    system.spawn_redo();
    assert_eq!(system.flush(), Ok(EventKind::REDO));
    assert_eq!(value(&system), 7);

    system.spawn_redo();
    assert_eq!(system.flush(), Ok(EventKind::NOOP), "Redo-Horizont erschöpft");
    assert_eq!(
        system.history().kinds(),
        vec![ADD, ADD, EventKind::UNDO, EventKind::REDO]
    );
}

// ─── Multi-Frame ─────────────────────────────────────────────────────────────

#[test]
fn multi_frame_events_coalesce_into_one_entry() {
    let mut system = counter_system();
    system.store_data_mut::<Counter>(COUNTER).value = 10;

    assert_eq!(drag(&mut system, 11), DRAG);
    // Gefaltete Ticks erzeugen keinen neuen Eintrag
    assert_eq!(drag(&mut system, 15), EventKind::NOOP);
    assert_eq!(drag(&mut system, 20), EventKind::NOOP);

    assert_eq!(value(&system), 20);
    assert_eq!(system.history().len(), 1);
    let entry = system.history().last().unwrap();
    let payload = entry.payload().downcast_ref::<Drag>().unwrap();
    assert_eq!(payload.value_before, 10);
    assert_eq!(payload.value, 20);

    system.spawn_undo();
    system.flush().unwrap();
    assert_eq!(value(&system), 10, "Ein Undo für die ganze Geste");
}

#[test]
fn failing_multi_frame_tick_leaves_entry_untouched() {
    let mut system = counter_system();
    assert_eq!(drag(&mut system, 5), DRAG);
    let dropped_before = dropped();

    assert_eq!(failing_drag(&mut system, 9), EventKind::NOOP);

    assert_eq!(dropped() - dropped_before, 1, "Payload sofort freigegeben");
    assert_eq!(value(&system), 5);
    assert_eq!(system.history().len(), 1);
    let entry = system.history().last().unwrap();
    let payload = entry.payload().downcast_ref::<Drag>().unwrap();
    assert_eq!(payload.value, 5);
    assert_eq!(payload.value_before, 0);

    system.spawn_undo();
    system.flush().unwrap();
    assert_eq!(value(&system), 0);
}

#[test]
fn multi_frame_does_not_merge_across_other_kinds() {
    let mut system = counter_system();
    drag(&mut system, 3);
    spawn_add(&mut system, 1);
    system.flush().unwrap();
    drag(&mut system, 8);

    assert_eq!(system.history().kinds(), vec![DRAG, ADD, DRAG]);
}

#[test]
fn multi_frame_after_undo_starts_new_entry() {
    let mut system = counter_system();
    drag(&mut system, 3);
    system.spawn_undo();
    system.flush().unwrap();
    drag(&mut system, 6);

    assert_eq!(system.history().kinds(), vec![DRAG, EventKind::UNDO, DRAG]);
    assert_eq!(value(&system), 6);
}

#[test]
fn undo_without_inverse_keeps_state_but_is_recorded() {
    let mut system = counter_system();
    system.spawn_event(&BUMP_META, BUMP).unwrap();
    system.flush().unwrap();
    assert_eq!(value(&system), 1);

    system.spawn_undo();
    assert_eq!(system.flush(), Ok(EventKind::UNDO));
    assert_eq!(value(&system), 1);
    assert_eq!(system.history().kinds(), vec![BUMP, EventKind::UNDO]);
}

// ─── Spawn-Verträge ──────────────────────────────────────────────────────────

#[test]
fn noop_cannot_be_spawned() {
    let mut system = counter_system();
    assert_eq!(
        system.spawn_event(&ADD_META, EventKind::NOOP).unwrap_err(),
        TransactionError::NoopEvent
    );
    assert_eq!(system.pending_len(), 0);
}

#[test]
fn missing_spawner_is_rejected() {
    let mut system = counter_system();
    let err = system.spawn_event(&BROKEN_META, EventKind(9)).unwrap_err();
    assert!(matches!(err, TransactionError::MissingSpawner { .. }));
    assert_eq!(system.pending_len(), 0);
}

#[test]
fn typed_spawn_checks_payload_type_before_enqueue() {
    let mut system = counter_system();
    let err = system.spawn_event_as::<Drag>(&ADD_META, ADD).unwrap_err();
    assert!(matches!(err, TransactionError::PayloadTypeMismatch { .. }));
    assert_eq!(system.pending_len(), 0);
    assert_eq!(dropped(), 1, "Fehlgetypter Payload wird sofort freigegeben");
}

#[test]
fn reserved_kinds_use_marker_payloads() {
    let mut system = counter_system();
    let payload = system.spawn_event(&ADD_META, EventKind::UNDO).unwrap();
    assert!(matches!(payload, Payload::Undo));
    let payload = system.spawn_event(&ADD_META, EventKind::REDO).unwrap();
    assert!(matches!(payload, Payload::Redo));
    assert_eq!(system.pending_len(), 2);
}

// ─── Abfragen & Abbau ────────────────────────────────────────────────────────

#[test]
fn try_store_data_reports_unknown_and_mistyped_stores() {
    let system = counter_system();
    assert_eq!(system.try_store_data::<Counter>(COUNTER).unwrap().value, 0);
    assert_eq!(
        system.try_store_data::<Counter>(StoreKind(7)).unwrap_err(),
        TransactionError::UnknownStore(StoreKind(7))
    );
    assert!(matches!(
        system.try_store_data::<String>(COUNTER),
        Err(TransactionError::StoreTypeMismatch { .. })
    ));
}

#[test]
fn undo_redo_queries_follow_history() {
    let mut system = counter_system();
    assert!(!system.can_undo());
    assert!(!system.can_redo());

    spawn_add(&mut system, 1);
    system.flush().unwrap();
    assert!(system.can_undo());
    assert_eq!(system.undo_description(), Some("Addieren"));
    assert_eq!(system.redo_description(), None);

    system.spawn_undo();
    system.flush().unwrap();
    assert!(!system.can_undo());
    assert!(system.can_redo());
    assert_eq!(system.redo_description(), Some("Addieren"));
}

#[test]
fn every_payload_is_dropped_exactly_once() {
    {
        let mut system = counter_system();
        spawn_add(&mut system, 1);
        system.flush().unwrap();
        spawn_add(&mut system, 2);
        system.flush().unwrap();
        spawn_failing_add(&mut system);
        system.flush().unwrap();
        spawn_add(&mut system, 3);
        assert_eq!(dropped(), 1, "Nur das fehlgeschlagene Event ist frei");
    }
    assert_eq!(dropped(), 4, "History und Queue beim Abbau freigegeben");
}

#[test]
fn options_control_history_logging() {
    let options = TransactionOptions {
        log_event_descriptions: false,
        ..TransactionOptions::default()
    };
    let mut system = TransactionSystem::with_options(&options);
    system.spawn_store(&COUNTER_META, COUNTER).unwrap();
    spawn_add(&mut system, 1);
    assert_eq!(system.flush(), Ok(ADD));
    assert!(!system.log_event_descriptions);
}
