//! Error types.
//!
//! Three disjoint surfaces: board operations reject invalid mutations as
//! no-ops, catalogs reject malformed snapshots at load, and the
//! persistence gateway reports write failures as-is. Alerts are not
//! errors — they are data produced by the conflict evaluator and never
//! block a mutation.

use thiserror::Error;

/// Rejection of a board mutation. The board state is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("no group at index {0}")]
    GroupNotFound(usize),
    #[error("trip '{0}' not found in the catalog")]
    TripNotFound(String),
    #[error("trip '{0}' is already a member of another group")]
    TripAlreadyGrouped(String),
    #[error("trip '{trip_id}' is not a member of group {group}")]
    TripNotInGroup { trip_id: String, group: usize },
    #[error("coordinator '{0}' not found in the catalog")]
    CoordinatorNotFound(String),
    #[error("swap requires two different groups")]
    SameGroup,
    #[error("swap requires two different trips")]
    SameTrip,
}

/// Rejection of a catalog snapshot at load time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate id '{0}' in catalog")]
    DuplicateId(String),
    #[error("trip '{0}' has end date before start date")]
    InvalidDateRange(String),
}

/// Failure reported by the persistence gateway.
///
/// Surfaced to the caller as-is; the in-memory board is left exactly as
/// it was before the persist call. Durable records written before the
/// failure are not rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("failed to create group record: {0}")]
    CreateGroup(String),
    #[error("failed to update group '{id}': {reason}")]
    UpdateGroup { id: String, reason: String },
    #[error("failed to write back trip '{id}': {reason}")]
    WriteTrip { id: String, reason: String },
}
