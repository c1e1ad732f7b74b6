// --- File: crates/courtlink_availability/src/finder.rs ---
//! Core availability check and alternative search.
//!
//! Answers "is this exact request free?" and, on a conflict, proposes the
//! nearest workable alternatives. A court hearing can carry up to three
//! segments (pre-hearing, main hearing, post-hearing conference), possibly in
//! different rooms; an alternative is only offered when every requested
//! segment is simultaneously free.

use crate::booked::{build_booked_locations, BookedLocations};
use crate::error::AvailabilityError;
use crate::interval::LocationInterval;
use crate::slots::{clamp_window, generate_slots, DayPart};
use chrono::{Duration, NaiveDate, NaiveTime};
use courtlink_common::models::Location;
use courtlink_common::services::AppointmentSource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Who the video link connects the prison to.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingType {
    Court,
    Probation,
}

/// Resolved engine settings for one prison.
///
/// Defaults are passed in explicitly rather than read from ambient state so
/// the engine stays pure and reentrant.
#[derive(Debug, Clone)]
pub struct AvailabilityOptions {
    /// Start of the bookable day.
    pub day_start: NaiveTime,
    /// End of the bookable day.
    pub day_end: NaiveTime,
    /// Step between candidate slot starts.
    pub step: Duration,
    /// Maximum number of alternatives returned on a conflict.
    pub max_alternatives: usize,
    /// Boundary between the morning and afternoon day parts.
    pub midday: NaiveTime,
}

impl Default for AvailabilityOptions {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            day_end: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            step: Duration::minutes(15),
            max_alternatives: 3,
            midday: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        }
    }
}

impl AvailabilityOptions {
    /// Resolves the options for a prison from the loaded configuration,
    /// applying the per-prison day-window override when one exists.
    pub fn from_config(
        config: &courtlink_config::AppConfig,
        prison_code: &str,
    ) -> Result<Self, AvailabilityError> {
        let availability = &config.availability;
        let mut day_start = availability
            .day_start_time()
            .map_err(|err| AvailabilityError::Config(err.to_string()))?;
        let mut day_end = availability
            .day_end_time()
            .map_err(|err| AvailabilityError::Config(err.to_string()))?;
        let midday = availability
            .midday_time()
            .map_err(|err| AvailabilityError::Config(err.to_string()))?;

        if let Some(prison) = config.prison(prison_code) {
            if let Some(start) = prison
                .day_start_time()
                .map_err(|err| AvailabilityError::Config(err.to_string()))?
            {
                day_start = start;
            }
            if let Some(end) = prison
                .day_end_time()
                .map_err(|err| AvailabilityError::Config(err.to_string()))?
            {
                day_end = end;
            }
        }

        let step_minutes = availability.slot_step_minutes();
        if step_minutes <= 0 {
            return Err(AvailabilityError::Config(format!(
                "slot step must be positive, got {step_minutes}"
            )));
        }
        if day_start >= day_end {
            return Err(AvailabilityError::Config(format!(
                "day window start {day_start} must be before end {day_end}"
            )));
        }

        Ok(Self {
            day_start,
            day_end,
            step: Duration::minutes(step_minutes),
            max_alternatives: availability.max_alternatives(),
            midday,
        })
    }

    /// The sub-window of the operating day covered by a day part; None when
    /// the part falls entirely outside the prison's day window.
    pub fn day_part_window(&self, part: DayPart) -> Option<(NaiveTime, NaiveTime)> {
        let day = (self.day_start, self.day_end);
        match part {
            DayPart::Morning => clamp_window(day, (self.day_start, self.midday)),
            DayPart::Afternoon => clamp_window(day, (self.midday, self.day_end)),
        }
    }
}

/// A request to check one video-link booking slot.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub booking_type: BookingType,
    /// Code of the court or probation team asking.
    pub requester_code: String,
    pub prison_code: String,
    pub date: NaiveDate,
    /// Pre-hearing conference segment; court bookings only.
    pub pre: Option<LocationInterval>,
    /// The main hearing segment.
    pub main: LocationInterval,
    /// Post-hearing conference segment; court bookings only.
    pub post: Option<LocationInterval>,
    /// When amending an existing booking, its id; that booking's own
    /// appointments do not count as conflicts against the amended request.
    pub exclude_booking_id: Option<i64>,
}

impl AvailabilityRequest {
    /// The present segments in pre, main, post order.
    pub fn segments(&self) -> Vec<&LocationInterval> {
        let mut segments = Vec::with_capacity(3);
        if let Some(pre) = &self.pre {
            segments.push(pre);
        }
        segments.push(&self.main);
        if let Some(post) = &self.post {
            segments.push(post);
        }
        segments
    }
}

/// One workable pre/main/post combination offered as an alternative.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeOption {
    pub pre: Option<LocationInterval>,
    pub main: LocationInterval,
    pub post: Option<LocationInterval>,
}

impl AlternativeOption {
    fn segments(&self) -> Vec<&LocationInterval> {
        let mut segments = Vec::with_capacity(3);
        if let Some(pre) = &self.pre {
            segments.push(pre);
        }
        segments.push(&self.main);
        if let Some(post) = &self.post {
            segments.push(post);
        }
        segments
    }
}

/// Outcome of an availability check.
///
/// `alternatives` is non-empty only when `availability_ok` is false and at
/// least one conflict-free combination exists within the day window. "Not
/// free and nothing else to offer" is a normal negative result, not an
/// error.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub availability_ok: bool,
    pub alternatives: Vec<AlternativeOption>,
}

/// Checks a request against the booked-interval index.
///
/// When any requested segment conflicts, the main segment's room and
/// duration pivot an alternative search across the day window: candidate
/// main slots are tried at or after the requested start, pre/post segments
/// are shifted by the same offset so the requested gaps are preserved, and a
/// combination is offered only when every present segment is free.
pub fn check_availability(
    request: &AvailabilityRequest,
    booked: &BookedLocations,
    options: &AvailabilityOptions,
) -> Result<AvailabilityResponse, AvailabilityError> {
    validate_request(request, booked)?;

    let conflicted = request
        .segments()
        .iter()
        .any(|segment| booked.is_booked(&segment.location_key, &segment.interval));
    if !conflicted {
        debug!(
            prison = %request.prison_code,
            main = %request.main.interval,
            "requested slot is free, skipping alternative search"
        );
        return Ok(AvailabilityResponse {
            availability_ok: true,
            alternatives: Vec::new(),
        });
    }

    let alternatives = find_alternatives(request, booked, options);
    debug!(
        prison = %request.prison_code,
        main = %request.main.interval,
        alternatives = alternatives.len(),
        "requested slot conflicts with existing appointments"
    );
    Ok(AvailabilityResponse {
        availability_ok: false,
        alternatives,
    })
}

/// Builds the booked index through `source` and runs [`check_availability`].
pub async fn check_request<S>(
    source: &S,
    locations: &[Location],
    request: &AvailabilityRequest,
    options: &AvailabilityOptions,
) -> Result<AvailabilityResponse, AvailabilityError>
where
    S: AppointmentSource + ?Sized,
{
    let booked = build_booked_locations(
        source,
        &request.prison_code,
        request.date,
        locations,
        request.exclude_booking_id,
    )
    .await?;
    check_availability(request, &booked, options)
}

fn validate_request(
    request: &AvailabilityRequest,
    booked: &BookedLocations,
) -> Result<(), AvailabilityError> {
    if request.prison_code.trim().is_empty() {
        return Err(AvailabilityError::Validation(
            "prison code must not be blank".to_string(),
        ));
    }
    if request.requester_code.trim().is_empty() {
        return Err(AvailabilityError::Validation(
            "requester code must not be blank".to_string(),
        ));
    }
    for segment in request.segments() {
        let interval = &segment.interval;
        if interval.start >= interval.end {
            return Err(AvailabilityError::InvalidInterval {
                start: interval.start,
                end: interval.end,
            });
        }
        if !booked.knows_location(&segment.location_key) {
            return Err(AvailabilityError::UnknownLocation(
                segment.location_key.clone(),
            ));
        }
    }
    Ok(())
}

fn find_alternatives(
    request: &AvailabilityRequest,
    booked: &BookedLocations,
    options: &AvailabilityOptions,
) -> Vec<AlternativeOption> {
    let requested_start = request.main.interval.start;
    let duration = request.main.interval.duration();
    // Proposed slots keep one step clear of existing bookings, so a court is
    // never offered a slot back-to-back with another hearing in the same
    // room.
    let margin = options.step;

    let mut accepted: Vec<(i64, AlternativeOption)> = Vec::new();
    for candidate in generate_slots(options.day_start, options.day_end, options.step, duration) {
        // Alternatives are only proposed at or after the requested start.
        if candidate.start < requested_start {
            continue;
        }
        let offset = candidate.start - requested_start;
        let Some(option) = shift_combination(request, candidate, offset) else {
            continue;
        };
        let free = option.segments().iter().all(|segment| {
            !booked.is_booked_with_margin(&segment.location_key, &segment.interval, margin)
        });
        if free {
            accepted.push((offset.num_seconds().abs(), option));
        }
    }

    // Nearest first; equal distances fall back to the earlier start rather
    // than relying on generation order.
    accepted.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.main.interval.start.cmp(&b.1.main.interval.start))
    });
    accepted
        .into_iter()
        .take(options.max_alternatives)
        .map(|(_, option)| option)
        .collect()
}

/// Shifts the requested combination so the main segment lands on
/// `candidate_main`, keeping every segment in its requested room and the
/// requested gaps between segments. None when a shifted pre/post would leave
/// the day.
fn shift_combination(
    request: &AvailabilityRequest,
    candidate_main: crate::interval::Interval,
    offset: Duration,
) -> Option<AlternativeOption> {
    let pre = match &request.pre {
        Some(segment) => Some(LocationInterval {
            location_key: segment.location_key.clone(),
            interval: segment.interval.shift(offset)?,
        }),
        None => None,
    };
    let post = match &request.post {
        Some(segment) => Some(LocationInterval {
            location_key: segment.location_key.clone(),
            interval: segment.interval.shift(offset)?,
        }),
        None => None,
    };
    Some(AlternativeOption {
        pre,
        main: LocationInterval {
            location_key: request.main.location_key.clone(),
            interval: candidate_main,
        },
        post,
    })
}
