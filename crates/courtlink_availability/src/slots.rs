// --- File: crates/courtlink_availability/src/slots.rs ---
//! Candidate slot generation across a prison's operating day.

use crate::interval::{seconds_from_midnight, Interval};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Half of the operating day, used to narrow "anywhere free" searches.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayPart {
    Morning,
    Afternoon,
}

/// Produces the ordered, finite set of fixed-length candidate slots tiling
/// the day window.
///
/// Each slot is `[t, t + slot_length)` for `t = day_start + k * step`,
/// emitted while the slot still fits inside the window. The sequence is
/// deterministic and bounded by `(day_end - day_start) / step` entries. A
/// non-positive step or slot length, or an empty window, yields no slots.
pub fn generate_slots(
    day_start: NaiveTime,
    day_end: NaiveTime,
    step: Duration,
    slot_length: Duration,
) -> Vec<Interval> {
    let mut slots = Vec::new();
    if step <= Duration::zero() || slot_length <= Duration::zero() || day_start >= day_end {
        return slots;
    }

    let step_secs = step.num_seconds();
    let slot_secs = slot_length.num_seconds();
    let window_end = seconds_from_midnight(day_end);

    let mut start = seconds_from_midnight(day_start);
    while start + slot_secs <= window_end {
        let slot = NaiveTime::from_num_seconds_from_midnight_opt(start as u32, 0).and_then(
            |slot_start| {
                NaiveTime::from_num_seconds_from_midnight_opt((start + slot_secs) as u32, 0)
                    .map(|slot_end| Interval {
                        start: slot_start,
                        end: slot_end,
                    })
            },
        );
        if let Some(slot) = slot {
            slots.push(slot);
        }
        start += step_secs;
    }
    slots
}

/// Clamps a sub-window to the operating day; None when they do not meet.
pub fn clamp_window(
    day: (NaiveTime, NaiveTime),
    part: (NaiveTime, NaiveTime),
) -> Option<(NaiveTime, NaiveTime)> {
    let start = day.0.max(part.0);
    let end = day.1.min(part.1);
    (start < end).then_some((start, end))
}
