//! Group board: the in-memory group store and its mutation surface.
//!
//! One [`GroupBoard`] backs one rostering session. It owns the two
//! read-only catalogs plus the authoritative group list, and every
//! mutating operation runs to completion before the next is accepted:
//! validate first, mutate, re-evaluate conflicts, re-apply the display
//! order. Invalid mutations are rejected as no-ops with a typed
//! [`BoardError`]; the board never ends up half-mutated.
//!
//! Groups are addressed by their position in the current display order.
//! Positions shift after every mutation (the ordering rule runs each
//! time), so callers re-read [`GroupBoard::groups`] rather than holding
//! on to indices.
//!
//! # Display order
//!
//! New (never-persisted) groups come first, in creation order; then all
//! other groups by descending trip count, ties by ascending first-trip
//! start date, empty groups last within a tie class.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::catalog::{CoordinatorCatalog, TripCatalog};
use crate::conflicts::evaluate;
use crate::error::{BoardError, PersistError};
use crate::models::{Trip, TripGroup};
use crate::partition::suggest_groups;
use crate::persist::{GroupRecord, PersistenceGateway, TripRefs};

/// What the group suggestion pass replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestScope {
    /// Discard the whole group set and re-partition every trip.
    /// Manual edits are lost.
    #[default]
    ReplaceAll,
    /// Partition only the free pool and append the produced groups,
    /// leaving existing groups untouched.
    FreeOnly,
}

/// In-memory group store for one rostering session.
#[derive(Debug, Clone)]
pub struct GroupBoard {
    trips: TripCatalog,
    coordinators: CoordinatorCatalog,
    groups: Vec<TripGroup>,
    next_seq: u64,
    dirty_labels: BTreeSet<String>,
}

impl GroupBoard {
    /// Creates a board with no groups.
    pub fn new(trips: TripCatalog, coordinators: CoordinatorCatalog) -> Self {
        Self {
            trips,
            coordinators,
            groups: Vec::new(),
            next_seq: 0,
            dirty_labels: BTreeSet::new(),
        }
    }

    /// Restores a board from previously persisted groups.
    ///
    /// The groups are evaluated and ordered immediately, so dangling
    /// trip references from an older session are pruned up front.
    pub fn from_parts(
        trips: TripCatalog,
        coordinators: CoordinatorCatalog,
        groups: Vec<TripGroup>,
    ) -> Self {
        let mut board = Self::new(trips, coordinators);
        for mut group in groups {
            group.created_seq = board.alloc_seq();
            board.groups.push(group);
        }
        board.finish();
        board
    }

    /// The trip catalog snapshot.
    pub fn trips(&self) -> &TripCatalog {
        &self.trips
    }

    /// The coordinator catalog snapshot.
    pub fn coordinators(&self) -> &CoordinatorCatalog {
        &self.coordinators
    }

    /// Groups in display order.
    pub fn groups(&self) -> &[TripGroup] {
        &self.groups
    }

    /// Trips not currently a member of any group, in catalog order.
    pub fn free_trips(&self) -> Vec<&Trip> {
        let grouped = self.grouped_ids();
        self.trips
            .iter()
            .filter(|t| !grouped.contains(t.id.as_str()))
            .collect()
    }

    /// Inserts an empty group, returning its display position.
    pub fn create_group(&mut self) -> usize {
        let seq = self.alloc_seq();
        self.groups.insert(0, TripGroup::new(seq));
        debug!(seq, "created empty group");
        self.finish();
        self.position_of_seq(seq)
    }

    /// Adds a free trip to a group.
    ///
    /// Rejected if the trip is already a member of any group; callers
    /// use [`move_trip`](Self::move_trip) for reassignment.
    pub fn add_trip(&mut self, group: usize, trip_id: &str) -> Result<(), BoardError> {
        self.check_group(group)?;
        if !self.trips.contains(trip_id) {
            return Err(BoardError::TripNotFound(trip_id.to_string()));
        }
        if self.grouped_ids().contains(trip_id) {
            return Err(BoardError::TripAlreadyGrouped(trip_id.to_string()));
        }

        self.groups[group].trip_ids.push(trip_id.to_string());
        debug!(group, trip_id, "added trip to group");
        self.finish();
        Ok(())
    }

    /// Moves a trip between groups; never leaves it in two groups or in
    /// neither.
    pub fn move_trip(&mut self, trip_id: &str, from: usize, to: usize) -> Result<(), BoardError> {
        self.check_group(from)?;
        self.check_group(to)?;
        if !self.groups[from].contains_trip(trip_id) {
            return Err(BoardError::TripNotInGroup {
                trip_id: trip_id.to_string(),
                group: from,
            });
        }

        self.groups[from].trip_ids.retain(|id| id != trip_id);
        self.groups[to].trip_ids.push(trip_id.to_string());
        debug!(trip_id, from, to, "moved trip");
        self.finish();
        Ok(())
    }

    /// Exchanges two trips between two different groups.
    pub fn swap_trips(
        &mut self,
        group_a: usize,
        trip_a: &str,
        group_b: usize,
        trip_b: &str,
    ) -> Result<(), BoardError> {
        if group_a == group_b {
            return Err(BoardError::SameGroup);
        }
        if trip_a == trip_b {
            return Err(BoardError::SameTrip);
        }
        self.check_group(group_a)?;
        self.check_group(group_b)?;
        if !self.groups[group_a].contains_trip(trip_a) {
            return Err(BoardError::TripNotInGroup {
                trip_id: trip_a.to_string(),
                group: group_a,
            });
        }
        if !self.groups[group_b].contains_trip(trip_b) {
            return Err(BoardError::TripNotInGroup {
                trip_id: trip_b.to_string(),
                group: group_b,
            });
        }

        for id in &mut self.groups[group_a].trip_ids {
            if id == trip_a {
                *id = trip_b.to_string();
            }
        }
        for id in &mut self.groups[group_b].trip_ids {
            if id == trip_b {
                *id = trip_a.to_string();
            }
        }
        debug!(trip_a, trip_b, "swapped trips");
        self.finish();
        Ok(())
    }

    /// Removes a trip from a group, returning it to the free pool.
    pub fn remove_trip(&mut self, group: usize, trip_id: &str) -> Result<(), BoardError> {
        self.check_group(group)?;
        if !self.groups[group].contains_trip(trip_id) {
            return Err(BoardError::TripNotInGroup {
                trip_id: trip_id.to_string(),
                group,
            });
        }

        self.groups[group].trip_ids.retain(|id| id != trip_id);
        debug!(group, trip_id, "removed trip from group");
        self.finish();
        Ok(())
    }

    /// Deletes a group; its trips return to the free pool.
    ///
    /// Irreversible — callers confirm out-of-band.
    pub fn delete_group(&mut self, group: usize) -> Result<(), BoardError> {
        self.check_group(group)?;
        let removed = self.groups.remove(group);
        debug!(group, trips = removed.trip_count(), "deleted group");
        self.finish();
        Ok(())
    }

    /// Assigns or clears a group's coordinator.
    pub fn set_coordinator(
        &mut self,
        group: usize,
        coordinator_id: Option<String>,
    ) -> Result<(), BoardError> {
        self.check_group(group)?;
        if let Some(id) = &coordinator_id {
            if !self.coordinators.contains(id) {
                return Err(BoardError::CoordinatorNotFound(id.clone()));
            }
        }

        self.groups[group].coordinator_id = coordinator_id;
        debug!(group, "set coordinator");
        self.finish();
        Ok(())
    }

    /// First coordinator, in catalog order, whose availability covers
    /// every trip in the group. `None` when no coordinator fits.
    pub fn suggest_coordinator(&self, group: usize) -> Result<Option<String>, BoardError> {
        self.check_group(group)?;
        let ranges: Vec<_> = self.groups[group]
            .trip_ids
            .iter()
            .filter_map(|id| self.trips.get(id))
            .map(|t| t.dates)
            .collect();

        Ok(self
            .coordinators
            .iter()
            .find(|c| ranges.iter().all(|r| c.covers(r)))
            .map(|c| c.id.clone()))
    }

    /// Flips a group's confirmed flag.
    pub fn toggle_confirmed(&mut self, group: usize) -> Result<(), BoardError> {
        self.check_group(group)?;
        self.groups[group].confirmed = !self.groups[group].confirmed;
        debug!(group, confirmed = self.groups[group].confirmed, "toggled confirmed");
        self.finish();
        Ok(())
    }

    /// Rewrites a trip's display label and marks it for write-back.
    pub fn set_trip_label(&mut self, trip_id: &str, label: &str) -> Result<(), BoardError> {
        if !self.trips.rename(trip_id, label.to_string()) {
            return Err(BoardError::TripNotFound(trip_id.to_string()));
        }
        self.dirty_labels.insert(trip_id.to_string());
        debug!(trip_id, "rewrote trip label");
        self.finish();
        Ok(())
    }

    /// Runs the greedy partitioner.
    ///
    /// [`SuggestScope::ReplaceAll`] rebuilds the entire group set from
    /// every trip in the catalog; [`SuggestScope::FreeOnly`] partitions
    /// the free pool and appends.
    pub fn suggest(&mut self, scope: SuggestScope) {
        let mut suggested = match scope {
            SuggestScope::ReplaceAll => {
                let all: Vec<&Trip> = self.trips.iter().collect();
                let groups = suggest_groups(&all);
                self.groups.clear();
                groups
            }
            SuggestScope::FreeOnly => suggest_groups(&self.free_trips()),
        };

        for group in &mut suggested {
            group.created_seq = self.alloc_seq();
        }
        info!(?scope, new_groups = suggested.len(), "suggestion pass");
        self.groups.extend(suggested);
        self.finish();
    }

    /// Persists the current snapshot through the gateway.
    ///
    /// On success, newly created groups receive their durable ids and
    /// stop being pinned as new. On failure the error is surfaced as-is
    /// and the in-memory board is left exactly as it was; records
    /// already written durably are not compensated.
    pub fn persist(&mut self, gateway: &mut dyn PersistenceGateway) -> Result<(), PersistError> {
        let mut created: Vec<(usize, String)> = Vec::new();
        let mut ids: Vec<Option<String>> = self.groups.iter().map(|g| g.id.clone()).collect();

        for (i, group) in self.groups.iter().enumerate() {
            let record = GroupRecord::from(group);
            match &group.id {
                None => {
                    let id = gateway.create_group(&record)?;
                    ids[i] = Some(id.clone());
                    created.push((i, id));
                }
                Some(id) => gateway.update_group(id, &record)?,
            }
        }

        for (i, group) in self.groups.iter().enumerate() {
            let group_id = ids[i].as_ref().expect("assigned or created above");
            for trip_id in &group.trip_ids {
                let refs = TripRefs {
                    group_id: group_id.clone(),
                    coordinator_id: group.coordinator_id.clone(),
                };
                gateway.write_trip_refs(trip_id, Some(&refs))?;
            }
        }

        let grouped = self.grouped_ids();
        for trip in self.trips.iter() {
            if !grouped.contains(trip.id.as_str()) {
                gateway.write_trip_refs(&trip.id, None)?;
            }
        }

        for trip_id in &self.dirty_labels {
            if let Some(trip) = self.trips.get(trip_id) {
                gateway.write_trip_label(trip_id, &trip.label)?;
            }
        }

        // Whole plan succeeded; only now touch the in-memory state.
        for (i, id) in created {
            self.groups[i].id = Some(id);
            self.groups[i].is_new = false;
        }
        self.dirty_labels.clear();
        self.reorder();
        info!(groups = self.groups.len(), "persisted board snapshot");
        Ok(())
    }

    fn alloc_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn check_group(&self, group: usize) -> Result<(), BoardError> {
        if group < self.groups.len() {
            Ok(())
        } else {
            Err(BoardError::GroupNotFound(group))
        }
    }

    fn grouped_ids(&self) -> HashSet<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.trip_ids.iter().map(String::as_str))
            .collect()
    }

    fn position_of_seq(&self, seq: u64) -> usize {
        self.groups
            .iter()
            .position(|g| g.created_seq == seq)
            .expect("group inserted this call")
    }

    /// Conflict re-evaluation followed by the ordering rule; the tail of
    /// every mutation.
    fn finish(&mut self) {
        evaluate(&mut self.groups, &self.trips, &self.coordinators);
        self.reorder();
    }

    fn reorder(&mut self) {
        let trips = &self.trips;
        self.groups.sort_by(|a, b| {
            use std::cmp::Ordering;
            match (a.is_new, b.is_new) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (true, true) => a.created_seq.cmp(&b.created_seq),
                (false, false) => b
                    .trip_count()
                    .cmp(&a.trip_count())
                    .then_with(|| first_start(a, trips).cmp(&first_start(b, trips)))
                    .then_with(|| a.created_seq.cmp(&b.created_seq)),
            }
        });
    }
}

/// Start date of a group's earliest trip; empty groups sort past all
/// real dates.
fn first_start(group: &TripGroup, trips: &TripCatalog) -> NaiveDate {
    group
        .trip_ids
        .first()
        .and_then(|id| trips.get(id))
        .map(|t| t.start())
        .unwrap_or(NaiveDate::MAX)
}
