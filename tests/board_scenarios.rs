//! End-to-end rostering scenarios through the public board API.

use chrono::NaiveDate;
use trip_roster::{
    AlertKind, BoardError, Coordinator, CoordinatorCatalog, DateRange, GroupBoard, MemoryGateway,
    Severity, SuggestScope, Trip, TripCatalog,
};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn catalog(defs: &[(&str, &str, &str)]) -> TripCatalog {
    TripCatalog::from_trips(
        defs.iter()
            .map(|(id, start, end)| Trip::new(*id, d(start), d(end)).with_label(*id))
            .collect(),
    )
    .unwrap()
}

fn coordinators(defs: &[(&str, &str, &str)]) -> CoordinatorCatalog {
    CoordinatorCatalog::from_coordinators(
        defs.iter()
            .map(|(id, start, end)| {
                Coordinator::new(*id).with_availability(DateRange::new(d(start), d(end)))
            })
            .collect(),
    )
    .unwrap()
}

fn no_coordinators() -> CoordinatorCatalog {
    CoordinatorCatalog::from_coordinators(vec![]).unwrap()
}

#[test]
fn back_to_back_pair_is_one_quiet_group() {
    let trips = catalog(&[
        ("A", "2024-01-01", "2024-01-05"),
        ("B", "2024-01-06", "2024-01-08"),
    ]);
    let mut board = GroupBoard::new(trips, no_coordinators());
    board.suggest(SuggestScope::ReplaceAll);

    assert_eq!(board.groups().len(), 1);
    assert_eq!(board.groups()[0].trip_ids, ["A", "B"]);
    assert!(board.groups()[0].alerts.is_empty());
}

#[test]
fn third_back_to_back_trip_warns_exactly_once() {
    let trips = catalog(&[
        ("A", "2024-01-01", "2024-01-05"),
        ("B", "2024-01-06", "2024-01-08"),
        ("C", "2024-01-09", "2024-01-10"),
    ]);
    let mut board = GroupBoard::new(trips, no_coordinators());
    board.suggest(SuggestScope::ReplaceAll);

    assert_eq!(board.groups().len(), 1);
    let alerts = &board.groups()[0].alerts;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::MissingRestDay);
    assert_eq!(alerts[0].severity, Severity::Warning);
}

#[test]
fn overlapping_trips_never_share_a_suggested_group() {
    let trips = catalog(&[
        ("A", "2024-02-01", "2024-02-10"),
        ("B", "2024-02-05", "2024-02-08"),
    ]);
    let mut board = GroupBoard::new(trips, no_coordinators());
    board.suggest(SuggestScope::ReplaceAll);

    assert_eq!(board.groups().len(), 2);
    for group in board.groups() {
        assert!(group.alerts.is_empty());
    }
}

#[test]
fn forcing_an_overlap_raises_an_error() {
    let trips = catalog(&[
        ("A", "2024-02-01", "2024-02-10"),
        ("B", "2024-02-05", "2024-02-08"),
    ]);
    let mut board = GroupBoard::new(trips, no_coordinators());
    let g = board.create_group();
    board.add_trip(g, "A").unwrap();
    board.add_trip(0, "B").unwrap();

    let group = &board.groups()[0];
    assert!(group
        .alerts
        .iter()
        .any(|a| a.kind == AlertKind::TripOverlap && a.severity == Severity::Error));
    assert!(group.alerts[0].message.contains('A'));
    assert!(group.alerts[0].message.contains('B'));
}

#[test]
fn trip_outside_availability_warns() {
    let trips = catalog(&[("X", "2024-02-01", "2024-02-03")]);
    let roster = coordinators(&[("C", "2024-01-01", "2024-01-31")]);
    let mut board = GroupBoard::new(trips, roster);
    let g = board.create_group();
    board.add_trip(g, "X").unwrap();
    board.set_coordinator(0, Some("C".into())).unwrap();

    let alerts = &board.groups()[0].alerts;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::OutsideAvailability);
    assert_eq!(alerts[0].severity, Severity::Warning);
    assert!(alerts[0].message.contains('X'));
}

#[test]
fn double_booked_coordinator_flags_both_groups() {
    let trips = catalog(&[
        ("A", "2024-03-01", "2024-03-05"),
        ("B", "2024-03-04", "2024-03-06"),
    ]);
    let roster = coordinators(&[("C", "2024-03-01", "2024-03-31")]);
    let mut board = GroupBoard::new(trips, roster);
    let g = board.create_group();
    board.add_trip(g, "A").unwrap();
    let g = board.create_group();
    board.add_trip(g, "B").unwrap();
    board.set_coordinator(0, Some("C".into())).unwrap();
    board.set_coordinator(1, Some("C".into())).unwrap();

    for group in board.groups() {
        assert!(
            group
                .alerts
                .iter()
                .any(|a| a.kind == AlertKind::DoubleBooked && a.severity == Severity::Error),
            "both groups must carry the double-booking error"
        );
    }
}

#[test]
fn rejected_swap_changes_nothing() {
    let trips = catalog(&[
        ("A", "2024-01-01", "2024-01-05"),
        ("B", "2024-02-01", "2024-02-05"),
        ("C", "2024-03-01", "2024-03-05"),
        ("D", "2024-04-01", "2024-04-05"),
    ]);
    let mut board = GroupBoard::new(trips, no_coordinators());
    let g = board.create_group();
    board.add_trip(g, "A").unwrap();
    let g = board.create_group();
    board.add_trip(g, "B").unwrap();

    let before: Vec<_> = board.groups().to_vec();

    // C and D are free-pool trips, members of neither group
    let err = board.swap_trips(0, "C", 1, "D").unwrap_err();
    assert!(matches!(err, BoardError::TripNotInGroup { .. }));

    let after = board.groups();
    assert_eq!(after.len(), before.len());
    for (now, was) in after.iter().zip(&before) {
        assert_eq!(now.trip_ids, was.trip_ids);
        assert_eq!(now.alerts, was.alerts);
    }
}

#[test]
fn full_session_invariants_hold() {
    let trips = catalog(&[
        ("A", "2024-01-01", "2024-01-05"),
        ("B", "2024-01-06", "2024-01-08"),
        ("C", "2024-01-09", "2024-01-10"),
        ("D", "2024-02-01", "2024-02-10"),
        ("E", "2024-02-05", "2024-02-08"),
        ("F", "2024-03-01", "2024-03-04"),
    ]);
    let roster = coordinators(&[
        ("C1", "2024-01-01", "2024-12-31"),
        ("C2", "2024-02-01", "2024-02-28"),
    ]);
    let mut board = GroupBoard::new(trips, roster);

    board.suggest(SuggestScope::ReplaceAll);
    let g = board.create_group();
    board.add_trip(g, "F").unwrap_err(); // F is grouped already
    let from = board
        .groups()
        .iter()
        .position(|gr| gr.contains_trip("F"))
        .unwrap();
    board.move_trip("F", from, g).unwrap();
    if let Some(fit) = board.suggest_coordinator(0).unwrap() {
        board.set_coordinator(0, Some(fit)).unwrap();
    }
    board.toggle_confirmed(0).unwrap();
    let mut gateway = MemoryGateway::new();
    board.persist(&mut gateway).unwrap();
    board.create_group();

    // Exclusivity: no trip id in two groups
    let mut seen = std::collections::HashSet::new();
    for group in board.groups() {
        for id in &group.trip_ids {
            assert!(seen.insert(id.clone()), "trip {id} appears twice");
        }
    }

    // Sort invariant: members ascend by start date
    for group in board.groups() {
        let starts: Vec<_> = group
            .trip_ids
            .iter()
            .map(|id| board.trips().get(id).unwrap().start())
            .collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    // Ordering invariant: new groups first, then count desc / first start asc
    let groups = board.groups();
    let first_old = groups.iter().position(|g| !g.is_new).unwrap_or(groups.len());
    assert!(groups[..first_old].iter().all(|g| g.is_new));
    assert!(groups[first_old..].iter().all(|g| !g.is_new));
    for pair in groups[first_old..].windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.trip_count() >= b.trip_count());
        if a.trip_count() == b.trip_count() && a.trip_count() > 0 {
            let start = |g: &trip_roster::TripGroup| {
                board.trips().get(&g.trip_ids[0]).unwrap().start()
            };
            assert!(start(a) <= start(b));
        }
    }

    // Idempotence: a no-op-shaped mutation pair leaves alerts unchanged
    let alerts_before: Vec<_> = board.groups().iter().map(|g| g.alerts.clone()).collect();
    board.toggle_confirmed(0).unwrap();
    board.toggle_confirmed(0).unwrap();
    let alerts_after: Vec<_> = board.groups().iter().map(|g| g.alerts.clone()).collect();
    assert_eq!(alerts_before, alerts_after);
}

#[test]
fn persisted_groups_round_trip_through_restore() {
    let trips = catalog(&[
        ("A", "2024-01-01", "2024-01-05"),
        ("B", "2024-01-06", "2024-01-08"),
    ]);
    let mut board = GroupBoard::new(trips, no_coordinators());
    board.suggest(SuggestScope::ReplaceAll);
    let mut gateway = MemoryGateway::new();
    board.persist(&mut gateway).unwrap();

    let stored = board.groups().to_vec();
    let trips2 = catalog(&[
        ("A", "2024-01-01", "2024-01-05"),
        ("B", "2024-01-06", "2024-01-08"),
    ]);
    let restored = GroupBoard::from_parts(trips2, no_coordinators(), stored);

    assert_eq!(restored.groups().len(), 1);
    assert_eq!(restored.groups()[0].id.as_deref(), Some("G1"));
    assert!(!restored.groups()[0].is_new);
    assert_eq!(restored.groups()[0].trip_ids, ["A", "B"]);
}
