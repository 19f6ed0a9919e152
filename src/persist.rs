//! Persistence gateway boundary.
//!
//! The engine never persists anything on its own; a caller hands a
//! [`PersistenceGateway`] to [`GroupBoard::persist`](crate::GroupBoard::persist),
//! which drives the full write-back:
//!
//! 1. create a durable record for every group without an id,
//! 2. upsert every group that already has one,
//! 3. write `group_id`/`coordinator_id` back onto every member trip,
//! 4. clear those references on every free-pool trip,
//! 5. write back every label the session rewrote.
//!
//! Writes run sequentially and the board stops at the first failure,
//! leaving its in-memory state untouched. Durable records written before
//! the failure are not compensated; retries are the gateway's concern.

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::models::TripGroup;

/// Snapshot of the persistable fields of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Member trips in display order.
    pub trip_ids: Vec<String>,
    /// Assigned coordinator, if any.
    pub coordinator_id: Option<String>,
    /// Confirmation flag.
    pub confirmed: bool,
}

impl From<&TripGroup> for GroupRecord {
    fn from(group: &TripGroup) -> Self {
        Self {
            trip_ids: group.trip_ids.clone(),
            coordinator_id: group.coordinator_id.clone(),
            confirmed: group.confirmed,
        }
    }
}

/// Back-references written onto a trip's durable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRefs {
    /// Durable id of the owning group.
    pub group_id: String,
    /// Coordinator assigned to that group, if any.
    pub coordinator_id: Option<String>,
}

/// Durable save/load boundary for groups and trip back-references.
///
/// Implementations own all I/O, batching and retry behavior. Each method
/// either commits the single write or reports the failure; the engine
/// treats any error as fatal for the current persist pass.
pub trait PersistenceGateway {
    /// Creates a durable record for a new group, returning its id.
    fn create_group(&mut self, record: &GroupRecord) -> Result<String, PersistError>;

    /// Upserts the persistable fields of an existing group.
    fn update_group(&mut self, id: &str, record: &GroupRecord) -> Result<(), PersistError>;

    /// Writes (`Some`) or clears (`None`) a trip's back-references.
    fn write_trip_refs(
        &mut self,
        trip_id: &str,
        refs: Option<&TripRefs>,
    ) -> Result<(), PersistError>;

    /// Writes back a rewritten trip label.
    fn write_trip_label(&mut self, trip_id: &str, label: &str) -> Result<(), PersistError>;
}

/// In-memory gateway that records every write.
///
/// Hands out sequential group ids (`G1`, `G2`, ...) and can be armed to
/// fail on the n-th write to exercise failure paths.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    next_id: u64,
    writes: u64,
    fail_on_write: Option<u64>,
    /// Created group records, in creation order.
    pub created: Vec<(String, GroupRecord)>,
    /// Upserted group records, in write order.
    pub updated: Vec<(String, GroupRecord)>,
    /// Trip back-reference writes (`None` = cleared), in write order.
    pub trip_refs: Vec<(String, Option<TripRefs>)>,
    /// Label write-backs, in write order.
    pub labels: Vec<(String, String)>,
}

impl MemoryGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the gateway to fail on the n-th write (1-based).
    pub fn with_failure_on_write(mut self, n: u64) -> Self {
        self.fail_on_write = Some(n);
        self
    }

    fn tick(&mut self) -> bool {
        self.writes += 1;
        self.fail_on_write == Some(self.writes)
    }
}

impl PersistenceGateway for MemoryGateway {
    fn create_group(&mut self, record: &GroupRecord) -> Result<String, PersistError> {
        if self.tick() {
            return Err(PersistError::CreateGroup("injected failure".into()));
        }
        self.next_id += 1;
        let id = format!("G{}", self.next_id);
        self.created.push((id.clone(), record.clone()));
        Ok(id)
    }

    fn update_group(&mut self, id: &str, record: &GroupRecord) -> Result<(), PersistError> {
        if self.tick() {
            return Err(PersistError::UpdateGroup {
                id: id.to_string(),
                reason: "injected failure".into(),
            });
        }
        self.updated.push((id.to_string(), record.clone()));
        Ok(())
    }

    fn write_trip_refs(
        &mut self,
        trip_id: &str,
        refs: Option<&TripRefs>,
    ) -> Result<(), PersistError> {
        if self.tick() {
            return Err(PersistError::WriteTrip {
                id: trip_id.to_string(),
                reason: "injected failure".into(),
            });
        }
        self.trip_refs.push((trip_id.to_string(), refs.cloned()));
        Ok(())
    }

    fn write_trip_label(&mut self, trip_id: &str, label: &str) -> Result<(), PersistError> {
        if self.tick() {
            return Err(PersistError::WriteTrip {
                id: trip_id.to_string(),
                reason: "injected failure".into(),
            });
        }
        self.labels.push((trip_id.to_string(), label.to_string()));
        Ok(())
    }
}
