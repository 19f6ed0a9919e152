//! Trip grouping and coordinator rostering engine.
//!
//! Backs the coordinator screen of a travel-operations back office:
//! partitions dated trips into coordinator-sized trip groups, keeps every
//! group's conflict alerts current, and drives the durable write-back
//! through an explicit persistence gateway.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Trip`, `Coordinator`, `TripGroup`,
//!   `Alert`, `DateRange`
//! - **`catalog`**: Read-only session snapshots of trips and coordinators
//! - **`partition`**: Greedy rest-day-aware group suggestion
//! - **`conflicts`**: Per-group and cross-group alert evaluation
//! - **`board`**: The group store, mutation operations and display order
//! - **`persist`**: Persistence gateway boundary
//! - **`stats`**: Board-level roster indicators
//!
//! # Architecture
//!
//! One [`GroupBoard`] backs one screen session. Catalogs are loaded once,
//! mutations run one at a time to completion, and every mutation ends
//! with conflict re-evaluation plus the ordering rule. Nothing is
//! persisted until the caller hands over a [`PersistenceGateway`].
//!
//! # Example
//!
//! ```
//! use trip_roster::{
//!     Coordinator, CoordinatorCatalog, DateRange, GroupBoard, SuggestScope, Trip, TripCatalog,
//! };
//!
//! let start = "2024-01-01".parse().unwrap();
//! let end = "2024-01-05".parse().unwrap();
//! let trips = TripCatalog::from_trips(vec![
//!     Trip::new("T1", start, end).with_label("Alps circuit"),
//! ])
//! .unwrap();
//! let coordinators = CoordinatorCatalog::from_coordinators(vec![
//!     Coordinator::new("C1")
//!         .with_name("Mara Lindt")
//!         .with_availability(DateRange::new(start, end)),
//! ])
//! .unwrap();
//!
//! let mut board = GroupBoard::new(trips, coordinators);
//! board.suggest(SuggestScope::ReplaceAll);
//! assert_eq!(board.groups().len(), 1);
//! assert_eq!(board.suggest_coordinator(0).unwrap().as_deref(), Some("C1"));
//! ```

pub mod board;
pub mod catalog;
pub mod conflicts;
pub mod error;
pub mod models;
pub mod partition;
pub mod persist;
pub mod stats;

pub use board::{GroupBoard, SuggestScope};
pub use catalog::{CoordinatorCatalog, TripCatalog};
pub use error::{BoardError, CatalogError, PersistError};
pub use models::{Alert, AlertKind, Coordinator, DateRange, Severity, Trip, TripGroup};
pub use persist::{GroupRecord, MemoryGateway, PersistenceGateway, TripRefs};
pub use stats::RosterStats;
