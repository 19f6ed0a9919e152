//! Trip model.
//!
//! A trip is one dated tour or business engagement to be staffed.
//! Trips are created and destroyed by the external booking system; the
//! engine reads them, groups them, and may rewrite the display label.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DateRange;

/// A dated tour/business engagement.
///
/// The id is an opaque external identifier and stays stable for the
/// lifetime of the record. Everything except the label is read-only
/// from the engine's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Opaque external identifier, stable.
    pub id: String,
    /// Internal business code (e.g. invoice or contract reference).
    pub business_code: String,
    /// Mutable display name.
    pub label: String,
    /// Program the trip belongs to.
    pub program: String,
    /// Destination, free text.
    pub destination: String,
    /// Occupied days, inclusive on both ends.
    pub dates: DateRange,
}

impl Trip {
    /// Creates a new trip covering the given dates.
    pub fn new(id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: id.into(),
            business_code: String::new(),
            label: String::new(),
            program: String::new(),
            destination: String::new(),
            dates: DateRange::new(start, end),
        }
    }

    /// Sets the business code.
    pub fn with_business_code(mut self, code: impl Into<String>) -> Self {
        self.business_code = code.into();
        self
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the program.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Sets the destination.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Display name: the label when set, otherwise the id.
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }

    /// First occupied day.
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.dates.start
    }

    /// Last occupied day.
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.dates.end
    }
}
