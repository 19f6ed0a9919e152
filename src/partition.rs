//! Greedy trip-group suggestion.
//!
//! # Algorithm
//!
//! 1. Sort trips ascending by start date.
//! 2. For each trip, scan the open groups and keep those it can join:
//!    at least one rest day after the group's last trip, or back-to-back
//!    while the group's zero-gap run is still short.
//! 3. Among eligible groups pick the one that frees up earliest
//!    (smallest last end date), append the trip and update the run state.
//! 4. If no group is eligible, open a new one.
//!
//! The zero-gap run cap bounds consecutive no-rest assignments to at most
//! two back-to-back joins, after which the trip must either find a group
//! with a rest day or start a new one.
//!
//! # Complexity
//! O(n * g) where n = trips, g = open groups.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 5: machine scheduling heuristics
//! (earliest finish time selection).

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{gap_days, Trip, TripGroup};

/// Back-to-back joins allowed before a group stops accepting zero-gap
/// trips (a third consecutive no-rest trip must go elsewhere).
const MAX_ZERO_STREAK: u32 = 2;

/// Partitioner working state for one group under construction.
struct OpenGroup {
    trip_ids: Vec<String>,
    /// End date of the most recently added trip.
    last_end: NaiveDate,
    /// Consecutive zero-gap joins ending at this group.
    zero_streak: u32,
}

/// Partitions trips into suggested groups.
///
/// Produces unconfirmed, unassigned, unpersisted groups in the order
/// they were opened. Does not touch any existing group set; callers
/// decide whether the result replaces or extends it.
pub fn suggest_groups(trips: &[&Trip]) -> Vec<TripGroup> {
    let mut ordered: Vec<&Trip> = trips.to_vec();
    ordered.sort_by(|a, b| {
        (a.start(), a.end(), a.id.as_str()).cmp(&(b.start(), b.end(), b.id.as_str()))
    });

    let mut open: Vec<OpenGroup> = Vec::new();

    for trip in ordered {
        let mut best: Option<usize> = None;
        let mut best_last_end = NaiveDate::MAX;

        for (i, g) in open.iter().enumerate() {
            let gap = gap_days(g.last_end, trip.start());
            let eligible = gap >= 1 || (gap == 0 && g.zero_streak < MAX_ZERO_STREAK);
            if eligible && g.last_end < best_last_end {
                best_last_end = g.last_end;
                best = Some(i);
            }
        }

        match best {
            Some(i) => {
                let g = &mut open[i];
                let gap = gap_days(g.last_end, trip.start());
                g.zero_streak = if gap == 0 { g.zero_streak + 1 } else { 0 };
                g.last_end = trip.end();
                g.trip_ids.push(trip.id.clone());
            }
            None => open.push(OpenGroup {
                trip_ids: vec![trip.id.clone()],
                last_end: trip.end(),
                zero_streak: 0,
            }),
        }
    }

    debug!(trips = trips.len(), groups = open.len(), "suggested trip groups");

    open.into_iter()
        .enumerate()
        .map(|(i, g)| {
            let mut group = TripGroup::new(i as u64);
            group.trip_ids = g.trip_ids;
            group
        })
        .collect()
}
