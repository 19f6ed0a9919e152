//! Calendar date ranges and rest-day arithmetic.
//!
//! The whole engine reasons about closed day intervals: a trip occupies
//! every day from its start date through its end date, inclusive. Rest
//! days are the whole days strictly between two ranges.
//!
//! # Gap Semantics
//! `gap_days(end_a, start_b)` counts the free days between two ranges:
//! `0` means back-to-back (the next trip starts the day after the previous
//! one ends), negative means the ranges touch or invert, positive is the
//! number of rest days available.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed calendar date interval [start, end].
///
/// Both endpoints are occupied days. `start <= end` is validated at
/// catalog load, not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// First occupied day (inclusive).
    pub start: NaiveDate,
    /// Last occupied day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of occupied days (a one-day trip has duration 1).
    #[inline]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether two closed ranges share at least one day.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Whether `inner` lies entirely within this range.
    #[inline]
    pub fn contains(&self, inner: &Self) -> bool {
        self.start <= inner.start && inner.end <= self.end
    }
}

/// Whole rest days between the end of one range and the start of another.
///
/// `0` = back-to-back with no rest day, negative = overlap or inverted
/// order, positive = rest days available.
#[inline]
pub fn gap_days(end_a: NaiveDate, start_b: NaiveDate) -> i64 {
    (start_b - end_a).num_days() - 1
}
