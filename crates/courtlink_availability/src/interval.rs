// --- File: crates/courtlink_availability/src/interval.rs ---
//! Time-of-day interval model.
//!
//! All occupancy in the engine is expressed as half-open `[start, end)`
//! intervals within a single prison-local day. Two intervals overlap iff
//! `a.start < b.end && b.start < a.end`; intervals that touch at a boundary
//! do not overlap, so a booking ending 10:00 and one starting 10:00 can
//! share a room.

use crate::error::AvailabilityError;
use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

const DAY_SECS: i64 = 24 * 60 * 60;

/// A half-open `[start, end)` time range within one day.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Interval {
    /// Creates an interval, rejecting `start >= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, AvailabilityError> {
        if start >= end {
            return Err(AvailabilityError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Half-open overlap test.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Shifts the interval by a signed offset, returning None when any part
    /// of the result would fall outside the day.
    pub fn shift(&self, offset: Duration) -> Option<Interval> {
        let offset_secs = offset.num_seconds();
        let start = seconds_from_midnight(self.start) + offset_secs;
        let end = seconds_from_midnight(self.end) + offset_secs;
        // An end of exactly 24:00 has no NaiveTime representation; day
        // windows close well before midnight, so it is discarded with the
        // rest of the out-of-day shifts.
        if start < 0 || end >= DAY_SECS {
            return None;
        }
        Some(Interval {
            start: NaiveTime::from_num_seconds_from_midnight_opt(start as u32, 0)?,
            end: NaiveTime::from_num_seconds_from_midnight_opt(end as u32, 0)?,
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

pub(crate) fn seconds_from_midnight(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}

/// A room together with the time it is wanted or occupied.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInterval {
    pub location_key: String,
    pub interval: Interval,
}

impl LocationInterval {
    pub fn new(location_key: impl Into<String>, interval: Interval) -> Self {
        Self {
            location_key: location_key.into(),
            interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn start_must_be_before_end() {
        assert!(Interval::new(time(10, 0), time(11, 0)).is_ok());
        assert!(Interval::new(time(11, 0), time(11, 0)).is_err());
        assert!(Interval::new(time(12, 0), time(11, 0)).is_err());
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let earlier = Interval::new(time(9, 0), time(10, 0)).unwrap();
        let later = Interval::new(time(10, 0), time(11, 0)).unwrap();

        assert!(!earlier.overlaps(&later));
        assert!(!later.overlaps(&earlier));
    }

    #[test]
    fn partial_and_contained_intervals_overlap() {
        let booked = Interval::new(time(10, 0), time(11, 0)).unwrap();
        let straddling = Interval::new(time(10, 30), time(11, 30)).unwrap();
        let contained = Interval::new(time(10, 15), time(10, 45)).unwrap();

        assert!(booked.overlaps(&straddling));
        assert!(straddling.overlaps(&booked));
        assert!(booked.overlaps(&contained));
    }

    #[test]
    fn shift_preserves_duration() {
        let interval = Interval::new(time(10, 0), time(10, 30)).unwrap();
        let shifted = interval.shift(Duration::minutes(45)).unwrap();

        assert_eq!(shifted.start, time(10, 45));
        assert_eq!(shifted.end, time(11, 15));
        assert_eq!(shifted.duration(), interval.duration());
    }

    #[test]
    fn shift_out_of_day_is_discarded() {
        let interval = Interval::new(time(9, 0), time(9, 30)).unwrap();

        assert!(interval.shift(Duration::minutes(-10 * 60)).is_none());
        assert!(interval.shift(Duration::hours(15)).is_none());
    }
}
