//! Board-level roster indicators.
//!
//! Computes summary counters from the current board state, for the
//! header strip of the rostering screen.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Groups | Total trip groups |
//! | Confirmed | Groups with a confirmed roster |
//! | Assigned trips | Trips that are a member of some group |
//! | Free trips | Trips in no group |
//! | Errors / Warnings | Alert totals across all groups |
//! | Coordinators in use | Distinct coordinators assigned to a group |
//! | Largest group | Trip count of the biggest group |

use std::collections::HashSet;

use crate::board::GroupBoard;
use crate::models::Severity;

/// Summary counters over a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStats {
    /// Total trip groups.
    pub group_count: usize,
    /// Groups with `confirmed` set.
    pub confirmed_count: usize,
    /// Trips that are a member of some group.
    pub assigned_trip_count: usize,
    /// Trips in no group.
    pub free_trip_count: usize,
    /// Error alerts across all groups.
    pub error_count: usize,
    /// Warning alerts across all groups.
    pub warning_count: usize,
    /// Distinct coordinators assigned to at least one group.
    pub coordinators_in_use: usize,
    /// Trip count of the largest group.
    pub largest_group_size: usize,
}

impl RosterStats {
    /// Computes the counters from the current board state.
    pub fn calculate(board: &GroupBoard) -> Self {
        let mut confirmed_count = 0;
        let mut assigned_trip_count = 0;
        let mut error_count = 0;
        let mut warning_count = 0;
        let mut largest_group_size = 0;
        let mut coordinators = HashSet::new();

        for group in board.groups() {
            if group.confirmed {
                confirmed_count += 1;
            }
            assigned_trip_count += group.trip_count();
            largest_group_size = largest_group_size.max(group.trip_count());
            if let Some(id) = &group.coordinator_id {
                coordinators.insert(id.as_str());
            }
            for alert in &group.alerts {
                match alert.severity {
                    Severity::Error => error_count += 1,
                    Severity::Warning => warning_count += 1,
                }
            }
        }

        Self {
            group_count: board.groups().len(),
            confirmed_count,
            assigned_trip_count,
            free_trip_count: board.trips().len() - assigned_trip_count,
            error_count,
            warning_count,
            coordinators_in_use: coordinators.len(),
            largest_group_size,
        }
    }
}
