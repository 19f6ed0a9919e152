//! Coordinator model.
//!
//! A coordinator is a person eligible for trip-group assignment. The
//! external CRUD surface owns the records; the engine only reads them,
//! and group suggestion consults nothing but the availability ranges.

use serde::{Deserialize, Serialize};

use super::DateRange;

/// A person eligible for assignment to a trip group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinator {
    /// Unique coordinator identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact phone, opaque to the engine.
    pub phone: String,
    /// Contact email, opaque to the engine.
    pub email: String,
    /// Date ranges during which the coordinator may be assigned.
    /// May be disjoint or overlapping.
    pub availability: Vec<DateRange>,
    /// Whether the record is active on the external surface.
    pub active: bool,
}

impl Coordinator {
    /// Creates a new active coordinator with no availability.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            availability: Vec::new(),
            active: true,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the contact phone.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Adds an availability range.
    pub fn with_availability(mut self, range: DateRange) -> Self {
        self.availability.push(range);
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether any single availability range contains the whole interval.
    ///
    /// A trip split across two adjacent ranges does not count as covered.
    pub fn covers(&self, range: &DateRange) -> bool {
        self.availability.iter().any(|a| a.contains(range))
    }
}
