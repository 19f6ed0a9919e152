//! Trip group and alert models.
//!
//! A trip group is a cluster of trips intended to be staffed by one
//! coordinator across a possibly non-contiguous sequence of tours.
//! Alerts are derived diagnostics attached to a group by the conflict
//! evaluator; they are display snapshots, never authoritative state.

use serde::{Deserialize, Serialize};

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// A scheduling rule is broken (overlap, double-booking).
    Error,
    /// Worth a look, but assignable (fatigue, availability).
    Warning,
}

/// Classification of scheduling alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    /// Two member trips share at least one day.
    TripOverlap,
    /// Adjacent member trips are not in consistent date order.
    OrderInconsistent,
    /// Three or more consecutive trips without a rest day between them.
    MissingRestDay,
    /// A member trip falls outside the assigned coordinator's availability.
    OutsideAvailability,
    /// The coordinator is also assigned to another group with overlapping dates.
    DoubleBooked,
}

/// A derived scheduling diagnostic attached to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert category.
    pub kind: AlertKind,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl Alert {
    /// Two member trips overlap.
    pub fn overlap(trip_a: &str, trip_b: &str) -> Self {
        Self {
            kind: AlertKind::TripOverlap,
            severity: Severity::Error,
            message: format!("Overlap between {trip_a} and {trip_b}"),
        }
    }

    /// Adjacent trips are out of date order.
    pub fn inconsistent_order(trip_a: &str, trip_b: &str) -> Self {
        Self {
            kind: AlertKind::OrderInconsistent,
            severity: Severity::Error,
            message: format!("Inconsistent order between {trip_a} and {trip_b}"),
        }
    }

    /// Third consecutive trip in an unbroken back-to-back run.
    pub fn missing_rest_day() -> Self {
        Self {
            kind: AlertKind::MissingRestDay,
            severity: Severity::Warning,
            message: "3 consecutive trips without a rest day".to_string(),
        }
    }

    /// A trip is outside the assigned coordinator's availability.
    pub fn outside_availability(trip: &str) -> Self {
        Self {
            kind: AlertKind::OutsideAvailability,
            severity: Severity::Warning,
            message: format!("Coordinator outside availability on trip {trip}"),
        }
    }

    /// The coordinator is double-booked with another group.
    pub fn double_booked(other_group: usize) -> Self {
        Self {
            kind: AlertKind::DoubleBooked,
            severity: Severity::Error,
            message: format!(
                "Coordinator also assigned in group {other_group} with overlapping dates"
            ),
        }
    }
}

/// A cluster of trips staffed by one coordinator.
///
/// `trip_ids` is kept sorted ascending by trip start date after every
/// evaluation pass. A trip id appears in at most one group board-wide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripGroup {
    /// Durable identifier, absent until first persisted.
    pub id: Option<String>,
    /// Member trips, sorted ascending by start date after any recompute.
    pub trip_ids: Vec<String>,
    /// Assigned coordinator, if any.
    pub coordinator_id: Option<String>,
    /// Whether the roster for this group is confirmed.
    pub confirmed: bool,
    /// Derived diagnostics, replaced wholesale on every evaluation.
    pub alerts: Vec<Alert>,
    /// True until first persisted. New groups are pinned first in
    /// display order regardless of size or date.
    pub is_new: bool,
    /// Monotonic creation sequence, drives the display order of new
    /// groups. Session-local, never persisted.
    #[serde(skip)]
    pub(crate) created_seq: u64,
}

impl TripGroup {
    /// Creates an empty, unpersisted group.
    pub(crate) fn new(created_seq: u64) -> Self {
        Self {
            id: None,
            trip_ids: Vec::new(),
            coordinator_id: None,
            confirmed: false,
            alerts: Vec::new(),
            is_new: true,
            created_seq,
        }
    }

    /// Number of member trips.
    #[inline]
    pub fn trip_count(&self) -> usize {
        self.trip_ids.len()
    }

    /// Whether the given trip is a member.
    pub fn contains_trip(&self, trip_id: &str) -> bool {
        self.trip_ids.iter().any(|id| id == trip_id)
    }

    /// Whether any alert has [`Severity::Error`].
    pub fn has_errors(&self) -> bool {
        self.alerts.iter().any(|a| a.severity == Severity::Error)
    }

    /// Whether any alert has [`Severity::Warning`].
    pub fn has_warnings(&self) -> bool {
        self.alerts.iter().any(|a| a.severity == Severity::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_factories() {
        let a = Alert::overlap("Alps", "Coast");
        assert_eq!(a.kind, AlertKind::TripOverlap);
        assert_eq!(a.severity, Severity::Error);
        assert_eq!(a.message, "Overlap between Alps and Coast");

        let b = Alert::missing_rest_day();
        assert_eq!(b.severity, Severity::Warning);

        let c = Alert::double_booked(3);
        assert!(c.message.contains("group 3"));
        assert_eq!(c.severity, Severity::Error);

        let d = Alert::outside_availability("Coast");
        assert_eq!(d.kind, AlertKind::OutsideAvailability);
        assert!(d.message.contains("Coast"));
    }

    #[test]
    fn test_group_serializes_without_session_state() {
        let mut g = TripGroup::new(7);
        g.trip_ids = vec!["T1".into()];
        g.alerts.push(Alert::missing_rest_day());

        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["trip_ids"][0], "T1");
        assert_eq!(json["is_new"], true);
        // The creation sequence is session-local and never serialized
        assert!(json.get("created_seq").is_none());

        let back: TripGroup = serde_json::from_value(json).unwrap();
        assert_eq!(back.trip_ids, g.trip_ids);
        assert_eq!(back.created_seq, 0);
    }

    #[test]
    fn test_group_flags() {
        let mut g = TripGroup::new(0);
        assert!(g.is_new);
        assert!(!g.confirmed);
        assert_eq!(g.trip_count(), 0);
        assert!(!g.has_errors());

        g.trip_ids.push("T1".into());
        assert!(g.contains_trip("T1"));
        assert!(!g.contains_trip("T2"));

        g.alerts.push(Alert::missing_rest_day());
        assert!(g.has_warnings());
        assert!(!g.has_errors());
    }
}
