//! Read-only session catalogs.
//!
//! Normalized views over the trip and coordinator records yielded by the
//! external sources. Each catalog is loaded once per session and treated
//! as a snapshot: the engine does not observe live external changes.
//!
//! Iteration order is insertion order, which makes catalog-order
//! dependent behavior (coordinator suggestion picks the first fit)
//! deterministic for a given snapshot.
//!
//! The one write path into a catalog is the trip label rewrite, which
//! the board exposes and marks for persistence write-back.

use std::collections::HashMap;

use tracing::debug;

use crate::error::CatalogError;
use crate::models::{Coordinator, Trip};

/// Normalized, id-indexed view of all trips for this session.
#[derive(Debug, Clone, Default)]
pub struct TripCatalog {
    trips: Vec<Trip>,
    index: HashMap<String, usize>,
}

impl TripCatalog {
    /// Builds a catalog from the trips yielded by the external source.
    ///
    /// Rejects duplicate ids and inverted date ranges; the snapshot is
    /// either fully valid or not loaded at all.
    pub fn from_trips(trips: Vec<Trip>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(trips.len());
        for (i, trip) in trips.iter().enumerate() {
            if trip.dates.end < trip.dates.start {
                return Err(CatalogError::InvalidDateRange(trip.id.clone()));
            }
            if index.insert(trip.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(trip.id.clone()));
            }
        }
        debug!(trips = trips.len(), "trip catalog loaded");
        Ok(Self { trips, index })
    }

    /// Looks up a trip by id.
    pub fn get(&self, id: &str) -> Option<&Trip> {
        self.index.get(id).map(|&i| &self.trips[i])
    }

    /// Whether the catalog holds the given id.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates trips in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter()
    }

    /// Number of trips.
    #[inline]
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the catalog is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Rewrites a trip's display label. Returns false for an unknown id.
    pub(crate) fn rename(&mut self, id: &str, label: String) -> bool {
        match self.index.get(id) {
            Some(&i) => {
                self.trips[i].label = label;
                true
            }
            None => false,
        }
    }
}

/// Normalized, id-indexed view of all coordinators for this session.
#[derive(Debug, Clone, Default)]
pub struct CoordinatorCatalog {
    coordinators: Vec<Coordinator>,
    index: HashMap<String, usize>,
}

impl CoordinatorCatalog {
    /// Builds a catalog from the coordinators yielded by the external
    /// source. Rejects duplicate ids.
    pub fn from_coordinators(coordinators: Vec<Coordinator>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(coordinators.len());
        for (i, c) in coordinators.iter().enumerate() {
            if index.insert(c.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(c.id.clone()));
            }
        }
        debug!(coordinators = coordinators.len(), "coordinator catalog loaded");
        Ok(Self { coordinators, index })
    }

    /// Looks up a coordinator by id.
    pub fn get(&self, id: &str) -> Option<&Coordinator> {
        self.index.get(id).map(|&i| &self.coordinators[i])
    }

    /// Whether the catalog holds the given id.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates coordinators in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinator> {
        self.coordinators.iter()
    }

    /// Number of coordinators.
    #[inline]
    pub fn len(&self) -> usize {
        self.coordinators.len()
    }

    /// Whether the catalog is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_trip_catalog_lookup_and_order() {
        let catalog = TripCatalog::from_trips(vec![
            Trip::new("T2", d("2024-01-10"), d("2024-01-12")),
            Trip::new("T1", d("2024-01-01"), d("2024-01-05")),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("T1"));
        assert_eq!(catalog.get("T2").unwrap().start(), d("2024-01-10"));
        assert!(catalog.get("T3").is_none());

        // Insertion order preserved
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["T2", "T1"]);
    }

    #[test]
    fn test_trip_catalog_duplicate_id() {
        let err = TripCatalog::from_trips(vec![
            Trip::new("T1", d("2024-01-01"), d("2024-01-05")),
            Trip::new("T1", d("2024-02-01"), d("2024-02-05")),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("T1".into()));
    }

    #[test]
    fn test_trip_catalog_inverted_dates() {
        let err =
            TripCatalog::from_trips(vec![Trip::new("T1", d("2024-01-05"), d("2024-01-01"))])
                .unwrap_err();
        assert_eq!(err, CatalogError::InvalidDateRange("T1".into()));
    }

    #[test]
    fn test_trip_catalog_rename() {
        let mut catalog =
            TripCatalog::from_trips(vec![Trip::new("T1", d("2024-01-01"), d("2024-01-05"))])
                .unwrap();

        assert!(catalog.rename("T1", "Renamed".into()));
        assert_eq!(catalog.get("T1").unwrap().label, "Renamed");
        assert!(!catalog.rename("T9", "Nope".into()));
    }

    #[test]
    fn test_coordinator_catalog() {
        let catalog = CoordinatorCatalog::from_coordinators(vec![
            Coordinator::new("C1").with_name("Mara"),
            Coordinator::new("C2")
                .with_name("Jon")
                .with_availability(DateRange::new(d("2024-01-01"), d("2024-01-31"))),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("C2").unwrap().name, "Jon");

        let names: Vec<&str> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Mara", "Jon"]);
    }

    #[test]
    fn test_coordinator_catalog_duplicate_id() {
        let err = CoordinatorCatalog::from_coordinators(vec![
            Coordinator::new("C1"),
            Coordinator::new("C1"),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("C1".into()));
    }
}
