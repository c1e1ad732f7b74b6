// --- File: crates/courtlink_availability/src/locations.rs ---
//! "Anywhere free" browsing across all rooms at a prison.
//!
//! Unlike the availability finder, which validates one specific request,
//! this query returns every free room/slot combination for a desired
//! duration, optionally narrowed to morning or afternoon. Nothing is ranked
//! or capped; filtering and pagination belong to the caller.

use crate::booked::BookedLocations;
use crate::error::AvailabilityError;
use crate::finder::AvailabilityOptions;
use crate::slots::{generate_slots, DayPart};
use chrono::{Duration, NaiveTime};
use courtlink_common::models::{Location, RoomUsage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One free slot at one room.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableLocation {
    pub name: String,
    pub location_key: String,
    pub location_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub usage: Option<RoomUsage>,
}

/// Returns every free room/slot combination of the requested duration.
///
/// Slots are generated per room and per requested day part, each day part
/// restricted to its own sub-window of the operating day. An empty
/// `day_parts` means the whole day, searched as one window so slots
/// straddling midday are still offered.
pub fn find_available_locations(
    rooms: &[Location],
    duration_minutes: i64,
    day_parts: &[DayPart],
    booked: &BookedLocations,
    options: &AvailabilityOptions,
) -> Result<Vec<AvailableLocation>, AvailabilityError> {
    if duration_minutes <= 0 {
        return Err(AvailabilityError::Validation(format!(
            "duration must be positive, got {duration_minutes} minutes"
        )));
    }
    let duration = Duration::minutes(duration_minutes);

    let windows: Vec<(NaiveTime, NaiveTime)> = if day_parts.is_empty() {
        vec![(options.day_start, options.day_end)]
    } else {
        let mut parts: Vec<DayPart> = Vec::new();
        for part in day_parts {
            if !parts.contains(part) {
                parts.push(*part);
            }
        }
        parts
            .into_iter()
            .filter_map(|part| options.day_part_window(part))
            .collect()
    };

    let mut free = Vec::new();
    for room in rooms {
        for (window_start, window_end) in &windows {
            for slot in generate_slots(*window_start, *window_end, options.step, duration) {
                if !booked.is_booked(&room.key, &slot) {
                    free.push(AvailableLocation {
                        name: room.name.clone(),
                        location_key: room.key.clone(),
                        location_id: room.id,
                        start_time: slot.start,
                        end_time: slot.end,
                        usage: room.usage,
                    });
                }
            }
        }
    }
    Ok(free)
}
