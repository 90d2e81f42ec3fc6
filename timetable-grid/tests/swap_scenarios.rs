use timetable_grid::config::TimetableConfig;
use timetable_grid::schedule::{
    Assignment, GridStore, Notification, SlotChange, SlotCoordinate, SlotEntry, SwapCoordinator,
    SwapState,
};

fn c(day: u8, period: u8) -> SlotCoordinate {
    SlotCoordinate::new(day, period)
}

fn week(entries: Vec<(SlotCoordinate, Assignment)>) -> GridStore {
    GridStore::with_entries(TimetableConfig::default().dimensions(), entries).expect("seed fits the week")
}

fn entries(store: &GridStore) -> Vec<(SlotCoordinate, Assignment)> {
    store
        .snapshot()
        .into_iter()
        .map(|e: SlotEntry| (e.coordinate(), e.assignment))
        .collect()
}

#[test]
fn confirmed_swap_exchanges_two_occupied_slots() {
    let mut store = week(vec![
        (c(0, 0), Assignment::new("C1", "T1", "K1")),
        (c(1, 0), Assignment::new("C2", "T2", "K1")),
    ]);
    let mut swap = SwapCoordinator::new();
    let mut events: Vec<Notification> = Vec::new();

    swap.select_slot(&store, c(0, 0), &mut events).unwrap();
    swap.select_slot(&store, c(1, 0), &mut events).unwrap();
    swap.confirm(&mut store, &mut events);

    assert_eq!(swap.state(), SwapState::Idle);
    assert_eq!(
        entries(&store),
        vec![
            (c(0, 0), Assignment::new("C2", "T2", "K1")),
            (c(1, 0), Assignment::new("C1", "T1", "K1")),
        ]
    );
    assert_eq!(
        events,
        vec![
            Notification::SelectionStarted { slot: c(0, 0) },
            Notification::SwapSucceeded {
                first: c(0, 0),
                second: c(1, 0),
                change: SlotChange::Swapped { first: c(0, 0), second: c(1, 0) },
            },
        ]
    );
}

#[test]
fn confirmed_move_relocates_into_empty_slot() {
    let mut store = week(vec![(c(0, 0), Assignment::new("C1", "T1", "K1"))]);
    let mut swap = SwapCoordinator::new();
    let mut events: Vec<Notification> = Vec::new();

    swap.select_slot(&store, c(0, 0), &mut events).unwrap();
    swap.select_slot(&store, c(2, 3), &mut events).unwrap();
    let change = swap.confirm(&mut store, &mut events);

    assert_eq!(change, Some(SlotChange::Moved { from: c(0, 0), to: c(2, 3) }));
    assert_eq!(entries(&store), vec![(c(2, 3), Assignment::new("C1", "T1", "K1"))]);
    assert_eq!(store.get(c(0, 0)).unwrap(), None);
}

#[test]
fn selecting_same_slot_twice_returns_to_idle_untouched() {
    let store = week(vec![(c(0, 0), Assignment::new("C1", "T1", "K1"))]);
    let before = entries(&store);
    let mut swap = SwapCoordinator::new();
    let mut events: Vec<Notification> = Vec::new();

    swap.select_slot(&store, c(0, 0), &mut events).unwrap();
    swap.select_slot(&store, c(0, 0), &mut events).unwrap();

    assert_eq!(swap.state(), SwapState::Idle);
    assert_eq!(entries(&store), before);
    assert_eq!(events.last(), Some(&Notification::SelectionCancelled));
}

#[test]
fn two_confirmed_swaps_restore_the_grid() {
    let mut store = week(vec![
        (c(0, 0), Assignment::new("C1", "T1", "K1")),
        (c(4, 7), Assignment::new("C2", "T2", "K2")),
    ]);
    let before = entries(&store);
    let mut swap = SwapCoordinator::new();
    let mut events: Vec<Notification> = Vec::new();

    for _ in 0..2 {
        swap.select_slot(&store, c(0, 0), &mut events).unwrap();
        swap.select_slot(&store, c(4, 7), &mut events).unwrap();
        swap.confirm(&mut store, &mut events);
    }

    assert_eq!(entries(&store), before);
}

#[test]
fn cancel_after_second_selection_leaves_grid_untouched() {
    let mut store = week(vec![
        (c(0, 0), Assignment::new("C1", "T1", "K1")),
        (c(1, 0), Assignment::new("C2", "T2", "K1")),
    ]);
    let before = entries(&store);
    let mut swap = SwapCoordinator::new();
    let mut events: Vec<Notification> = Vec::new();

    swap.select_slot(&store, c(0, 0), &mut events).unwrap();
    swap.select_slot(&store, c(1, 0), &mut events).unwrap();
    assert!(swap.cancel(&mut events));
    // A stray confirm afterwards must not commit the cancelled swap
    assert_eq!(swap.confirm(&mut store, &mut events), None);

    assert_eq!(swap.state(), SwapState::Idle);
    assert_eq!(entries(&store), before);
}

#[test]
fn direct_edits_between_selection_and_confirm_are_respected() {
    let mut store = week(vec![(c(0, 0), Assignment::new("C1", "T1", "K1"))]);
    let mut swap = SwapCoordinator::new();
    let mut events: Vec<Notification> = Vec::new();

    swap.select_slot(&store, c(0, 0), &mut events).unwrap();
    swap.select_slot(&store, c(1, 1), &mut events).unwrap();
    // The edit dialog fills the second slot before the user confirms
    store.set(c(1, 1), Assignment::new("C9", "T9", "K1")).unwrap();
    let change = swap.confirm(&mut store, &mut events);

    assert_eq!(change, Some(SlotChange::Swapped { first: c(0, 0), second: c(1, 1) }));
    assert_eq!(store.get(c(0, 0)).unwrap().unwrap().course_id, "C9");
    assert_eq!(store.get(c(1, 1)).unwrap().unwrap().course_id, "C1");
    assert_eq!(store.len(), 2);
}

fn assignments(store: &GridStore) -> Vec<Assignment> {
    let mut all: Vec<Assignment> = store.iter().map(|(_, a)| a.clone()).collect();
    all.sort_by(|a, b| {
        (&a.course_id, &a.teacher_id, &a.class_id).cmp(&(&b.course_id, &b.teacher_id, &b.class_id))
    });
    all
}

#[test]
fn confirmed_swaps_never_create_or_lose_assignments() {
    let mut store = week(Vec::new());
    let mut swap = SwapCoordinator::new();
    let mut events: Vec<Notification> = Vec::new();
    let dims = store.dimensions();
    let mut committed = 0;

    // Deterministic walk mixing CRUD and swaps across the whole week
    let mut n: u32 = 7;
    for step in 0..400u32 {
        n = n.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let coord = c(((n >> 8) % dims.days as u32) as u8, ((n >> 16) % dims.periods as u32) as u8);
        match step % 6 {
            0 | 1 => {
                store.set(coord, Assignment::new(step.to_string(), "T", "K")).unwrap();
            }
            2 => {
                store.remove(coord).unwrap();
            }
            3 | 4 => {
                swap.select_slot(&store, coord, &mut events).unwrap();
            }
            _ => {
                let pending = swap.state().selected();
                let before = assignments(&store);
                let occupied_before: Vec<bool> =
                    pending.iter().map(|s| store.get(*s).unwrap().is_some()).collect();

                if let Some(change) = swap.confirm(&mut store, &mut events) {
                    committed += 1;
                    assert_eq!(assignments(&store), before, "confirm at step {} changed which assignments exist", step);
                    let occupied_after: Vec<bool> =
                        pending.iter().map(|s| store.get(*s).unwrap().is_some()).collect();
                    let mut sorted_before = occupied_before.clone();
                    let mut sorted_after = occupied_after;
                    sorted_before.sort();
                    sorted_after.sort();
                    assert_eq!(sorted_after, sorted_before, "{:?} at step {}", change, step);
                }
            }
        }
        assert!(store.iter().all(|(coord, _)| dims.contains(coord)));
    }

    assert!(committed > 0, "the walk never reached a confirmed swap");
}
