// --- File: crates/courtlink_availability/src/booked.rs ---
//! Booked-interval index for one prison and date.
//!
//! [`BookedLocations`] is built once per availability check from raw upstream
//! appointment rows and then queried many times during the slot search. It is
//! immutable after construction, so concurrent checks for different
//! prisons/dates need no coordination.

use crate::error::AvailabilityError;
use crate::interval::Interval;
use chrono::{Duration, NaiveDate};
use courtlink_common::models::Location;
use courtlink_common::services::{AppointmentSource, AppointmentStatus};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, error};

/// A single occupied interval at a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookedLocation {
    pub location_key: String,
    pub interval: Interval,
}

/// Queryable set of already-occupied room/time intervals for one prison and
/// date.
#[derive(Debug, Clone, Default)]
pub struct BookedLocations {
    by_location: HashMap<String, Vec<Interval>>,
}

impl BookedLocations {
    /// Builds an index over the given rooms. Rooms without bookings are
    /// present with no intervals, so lookups can distinguish a free room
    /// from a room the index was never asked about; occupied intervals at
    /// rooms outside the given set are dropped.
    pub fn new<I>(location_keys: I, booked: Vec<BookedLocation>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut by_location: HashMap<String, Vec<Interval>> = location_keys
            .into_iter()
            .map(|key| (key, Vec::new()))
            .collect();
        for item in booked {
            if let Some(intervals) = by_location.get_mut(&item.location_key) {
                intervals.push(item.interval);
            }
        }
        for intervals in by_location.values_mut() {
            intervals.sort_by_key(|interval| interval.start);
        }
        Self { by_location }
    }

    /// True when the index was built over this room.
    pub fn knows_location(&self, location_key: &str) -> bool {
        self.by_location.contains_key(location_key)
    }

    /// Half-open overlap test against every stored interval at the room.
    /// Rooms the index does not know report free; callers validate keys up
    /// front.
    pub fn is_booked(&self, location_key: &str, candidate: &Interval) -> bool {
        self.by_location
            .get(location_key)
            .is_some_and(|intervals| intervals.iter().any(|booked| booked.overlaps(candidate)))
    }

    /// Overlap test with a symmetric guard margin around each booked
    /// interval. The alternative search uses this to keep proposed slots one
    /// step clear of existing bookings; the exact yes/no check stays
    /// [`Self::is_booked`].
    pub fn is_booked_with_margin(
        &self,
        location_key: &str,
        candidate: &Interval,
        margin: Duration,
    ) -> bool {
        use crate::interval::seconds_from_midnight as secs;

        let margin_secs = margin.num_seconds().max(0);
        self.by_location
            .get(location_key)
            .is_some_and(|intervals| {
                intervals.iter().any(|booked| {
                    secs(candidate.start) < secs(booked.end) + margin_secs
                        && secs(booked.start) - margin_secs < secs(candidate.end)
                })
            })
    }
}

/// Assembles the booked-interval index for `prison_code` on `date` over the
/// given rooms.
///
/// Rows are fetched through the injected [`AppointmentSource`] capability;
/// cancelled rows, rows owned by `exclude_booking_id` (used when amending a
/// booking in place, so it does not conflict with itself) and rows for rooms
/// outside the set are dropped. An upstream failure is fatal: there is no
/// safe default for unknown occupancy.
pub async fn build_booked_locations<S>(
    source: &S,
    prison_code: &str,
    date: NaiveDate,
    locations: &[Location],
    exclude_booking_id: Option<i64>,
) -> Result<BookedLocations, AvailabilityError>
where
    S: AppointmentSource + ?Sized,
{
    let keys: Vec<String> = locations.iter().map(|location| location.key.clone()).collect();

    let records = source
        .fetch_appointments(prison_code, date, &keys)
        .await
        .map_err(|err| {
            error!(prison = %prison_code, %date, "appointment lookup failed: {err}");
            AvailabilityError::Upstream(err.to_string())
        })?;

    let mut booked = Vec::new();
    for record in records {
        if record.status != AppointmentStatus::Active {
            continue;
        }
        if exclude_booking_id == Some(record.booking_id) {
            continue;
        }
        if record.prison_code != prison_code || record.date != date {
            debug!(
                booking = record.booking_id,
                "dropping appointment row outside the requested prison/date"
            );
            continue;
        }
        let interval = Interval::new(record.start_time, record.end_time).map_err(|_| {
            AvailabilityError::Upstream(format!(
                "invalid appointment interval {}-{} at {} (booking {})",
                record.start_time, record.end_time, record.location_key, record.booking_id
            ))
        })?;
        booked.push(BookedLocation {
            location_key: record.location_key,
            interval,
        });
    }

    debug!(
        prison = %prison_code,
        %date,
        rooms = keys.len(),
        occupied = booked.len(),
        "built booked-location index"
    );
    Ok(BookedLocations::new(keys, booked))
}
