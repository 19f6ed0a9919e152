//! Conflict evaluation for trip groups.
//!
//! Recomputes every group's alert list from current membership and
//! coordinator assignment. Runs after every board mutation and is
//! idempotent: two passes with no intervening mutation produce the same
//! alerts.
//!
//! Two side effects are part of the contract, not incidental:
//!
//! - **Prune**: member ids that no longer resolve in the trip catalog
//!   are dropped from the group (the catalog is externally owned and may
//!   have changed between sessions).
//! - **Sort**: each group's members are re-sorted ascending by trip
//!   start date.
//!
//! Everything else is a pure read producing [`Alert`]s. Alerts never
//! block a mutation; they only inform the caller.

use tracing::debug;

use crate::catalog::{CoordinatorCatalog, TripCatalog};
use crate::models::{gap_days, Alert, Trip, TripGroup};

/// Zero-gap run length at which the rest-day warning fires.
const REST_WARN_STREAK: u32 = 2;

/// Re-evaluates all groups, replacing each alert list wholly.
pub fn evaluate(
    groups: &mut [TripGroup],
    trips: &TripCatalog,
    coordinators: &CoordinatorCatalog,
) {
    let mut alerts: Vec<Vec<Alert>> = Vec::with_capacity(groups.len());

    for group in groups.iter_mut() {
        prune_and_sort(group, trips);
        alerts.push(group_alerts(group, trips, coordinators));
    }

    cross_group_alerts(groups, trips, &mut alerts);

    for (group, list) in groups.iter_mut().zip(alerts) {
        group.alerts = list;
    }
}

/// Drops dangling member ids and sorts members by start date.
fn prune_and_sort(group: &mut TripGroup, trips: &TripCatalog) {
    let before = group.trip_ids.len();
    group.trip_ids.retain(|id| trips.contains(id));
    if group.trip_ids.len() < before {
        debug!(
            dropped = before - group.trip_ids.len(),
            "pruned dangling trip references from group"
        );
    }

    group.trip_ids.sort_by(|a, b| {
        let ta = trips.get(a).expect("pruned above");
        let tb = trips.get(b).expect("pruned above");
        (ta.start(), ta.end(), a.as_str()).cmp(&(tb.start(), tb.end(), b.as_str()))
    });
}

/// Alerts derived from one group in isolation.
fn group_alerts(
    group: &TripGroup,
    trips: &TripCatalog,
    coordinators: &CoordinatorCatalog,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let members: Vec<&Trip> = group
        .trip_ids
        .iter()
        .map(|id| trips.get(id).expect("membership pruned against catalog"))
        .collect();

    let mut zero_streak: u32 = 0;
    for pair in members.windows(2) {
        let (a, b) = (pair[0], pair[1]);

        if a.dates.overlaps(&b.dates) {
            alerts.push(Alert::overlap(a.display_name(), b.display_name()));
        }

        let gap = gap_days(a.end(), b.start());
        if gap < 0 {
            alerts.push(Alert::inconsistent_order(a.display_name(), b.display_name()));
        }

        if gap == 0 {
            zero_streak += 1;
            if zero_streak >= REST_WARN_STREAK {
                alerts.push(Alert::missing_rest_day());
            }
        } else {
            zero_streak = 0;
        }
    }

    if let Some(coordinator) = group
        .coordinator_id
        .as_deref()
        .and_then(|id| coordinators.get(id))
    {
        for trip in &members {
            if !coordinator.covers(&trip.dates) {
                alerts.push(Alert::outside_availability(trip.display_name()));
            }
        }
    }

    alerts
}

/// Double-booking errors across groups sharing a coordinator.
///
/// Emitted on both sides of each conflicting pair; groups are named by
/// their 1-based position in the evaluated list.
fn cross_group_alerts(groups: &[TripGroup], trips: &TripCatalog, alerts: &mut [Vec<Alert>]) {
    for i in 0..groups.len() {
        let Some(ci) = groups[i].coordinator_id.as_deref() else {
            continue;
        };
        for j in (i + 1)..groups.len() {
            if groups[j].coordinator_id.as_deref() != Some(ci) {
                continue;
            }
            if groups_overlap(&groups[i], &groups[j], trips) {
                alerts[i].push(Alert::double_booked(j + 1));
                alerts[j].push(Alert::double_booked(i + 1));
            }
        }
    }
}

/// Whether any trip of one group overlaps any trip of the other.
fn groups_overlap(a: &TripGroup, b: &TripGroup, trips: &TripCatalog) -> bool {
    a.trip_ids.iter().any(|ia| {
        let ta = trips.get(ia).expect("membership pruned against catalog");
        b.trip_ids.iter().any(|ib| {
            let tb = trips.get(ib).expect("membership pruned against catalog");
            ta.dates.overlaps(&tb.dates)
        })
    })
}
