// --- File: crates/courtlink_availability/src/source.rs ---
//! Appointment-source implementations.
//!
//! Which upstream serves a prison's appointment data is a per-prison
//! configuration choice: most prisons are covered by the internal
//! appointment store, some are rolled onto the external
//! activities-scheduling service. Both sit behind the
//! [`AppointmentSource`] capability, so the engine never branches on the
//! source itself.

use chrono::{NaiveDate, NaiveTime};
use courtlink_common::error::config_error;
use courtlink_common::http;
use courtlink_common::services::{
    AppointmentRecord, AppointmentSource, AppointmentStatus, BoxFuture, BoxedError,
};
use courtlink_common::CourtlinkError;
use courtlink_config::{ActivitiesConfig, AppConfig};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when calling the activities-scheduling service.
#[derive(Error, Debug)]
pub enum ActivitiesSourceError {
    #[error("Activities API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Activities API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to decode activities response: {0}")]
    Decode(String),
}

// Wire shape of the activities scheduled-events endpoint. Times come over as
// "HH:MM" strings and are parsed explicitly rather than through chrono's
// serde, which expects seconds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduledEventsResponse {
    scheduled_events: Vec<ScheduledEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduledEvent {
    booking_id: i64,
    prison_code: String,
    location_key: String,
    date: NaiveDate,
    start_time: String,
    end_time: String,
    #[serde(default)]
    cancelled: bool,
}

pub(crate) fn parse_wire_time(value: &str) -> Result<NaiveTime, ActivitiesSourceError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|err| ActivitiesSourceError::Decode(format!("bad time '{value}': {err}")))
}

impl ScheduledEvent {
    fn into_record(self) -> Result<AppointmentRecord, ActivitiesSourceError> {
        Ok(AppointmentRecord {
            booking_id: self.booking_id,
            prison_code: self.prison_code,
            location_key: self.location_key,
            date: self.date,
            start_time: parse_wire_time(&self.start_time)?,
            end_time: parse_wire_time(&self.end_time)?,
            status: if self.cancelled {
                AppointmentStatus::Cancelled
            } else {
                AppointmentStatus::Active
            },
        })
    }
}

/// Appointment source backed by the external activities-scheduling service.
pub struct ActivitiesAppointmentSource {
    base_url: String,
    client: reqwest::Client,
}

impl ActivitiesAppointmentSource {
    /// Create a source from the activities connection settings. Uses the
    /// shared HTTP client unless a custom timeout is configured.
    pub fn new(config: &ActivitiesConfig) -> Result<Self, CourtlinkError> {
        let client = match config.timeout_secs {
            Some(secs) => http::create_client(secs, true)?,
            None => http::HTTP_CLIENT.clone(),
        };
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl AppointmentSource for ActivitiesAppointmentSource {
    type Error = ActivitiesSourceError;

    fn fetch_appointments(
        &self,
        prison_code: &str,
        date: NaiveDate,
        location_keys: &[String],
    ) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error> {
        let url = format!("{}/scheduled-events/prison/{}", self.base_url, prison_code);
        let mut query: Vec<(&str, String)> = vec![("date", date.to_string())];
        for key in location_keys {
            query.push(("locationKey", key.clone()));
        }
        let client = self.client.clone();

        Box::pin(async move {
            let response = client.get(&url).query(&query).send().await?;
            if !response.status().is_success() {
                return Err(ActivitiesSourceError::Status(response.status()));
            }
            let payload: ScheduledEventsResponse = response
                .json()
                .await
                .map_err(|err| ActivitiesSourceError::Decode(err.to_string()))?;

            debug!(
                %url,
                events = payload.scheduled_events.len(),
                "fetched scheduled events from activities service"
            );
            payload
                .scheduled_events
                .into_iter()
                .map(ScheduledEvent::into_record)
                .collect()
        })
    }
}

/// Adapter that erases a source's concrete error type behind [`BoxedError`],
/// so sources with different error types can sit behind one trait object.
pub struct BoxingAppointmentSource<S> {
    inner: S,
}

impl<S> BoxingAppointmentSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: AppointmentSource> AppointmentSource for BoxingAppointmentSource<S> {
    type Error = BoxedError;

    fn fetch_appointments(
        &self,
        prison_code: &str,
        date: NaiveDate,
        location_keys: &[String],
    ) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error> {
        let prison_code = prison_code.to_string();
        let location_keys = location_keys.to_vec();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .fetch_appointments(&prison_code, date, &location_keys)
                .await
                .map_err(|err| BoxedError(Box::new(err)))
        })
    }
}

/// Routes appointment lookups to the internal store or the activities
/// service depending on per-prison configuration.
pub struct SelectingAppointmentSource {
    internal: Arc<dyn AppointmentSource<Error = BoxedError>>,
    activities: Option<Arc<dyn AppointmentSource<Error = BoxedError>>>,
    activities_prisons: HashSet<String>,
}

impl SelectingAppointmentSource {
    pub fn from_config(
        config: &AppConfig,
        internal: Arc<dyn AppointmentSource<Error = BoxedError>>,
        activities: Option<Arc<dyn AppointmentSource<Error = BoxedError>>>,
    ) -> Self {
        let activities_prisons = config
            .prisons
            .iter()
            .filter(|prison| prison.use_activities_source)
            .map(|prison| prison.code.clone())
            .collect();
        Self {
            internal,
            activities,
            activities_prisons,
        }
    }
}

impl AppointmentSource for SelectingAppointmentSource {
    type Error = BoxedError;

    fn fetch_appointments(
        &self,
        prison_code: &str,
        date: NaiveDate,
        location_keys: &[String],
    ) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error> {
        if self.activities_prisons.contains(prison_code) {
            debug!(prison = %prison_code, "routing appointment lookup to activities service");
            match &self.activities {
                Some(source) => source.fetch_appointments(prison_code, date, location_keys),
                None => {
                    // Falling back to the internal store would answer from the
                    // wrong system of record, so this is a hard error.
                    let prison_code = prison_code.to_string();
                    Box::pin(async move {
                        Err(BoxedError(Box::new(config_error(format!(
                            "prison {prison_code} is routed to the activities service, but none is configured"
                        )))))
                    })
                }
            }
        } else {
            self.internal.fetch_appointments(prison_code, date, location_keys)
        }
    }
}

pub mod mock {
    //! In-memory appointment sources for tests and local development.

    use super::*;
    use courtlink_common::error::upstream_error;

    /// Source serving a fixed set of appointment rows.
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryAppointmentSource {
        records: Vec<AppointmentRecord>,
    }

    impl InMemoryAppointmentSource {
        pub fn new(records: Vec<AppointmentRecord>) -> Self {
            Self { records }
        }

        pub fn empty() -> Self {
            Self::default()
        }
    }

    impl AppointmentSource for InMemoryAppointmentSource {
        type Error = BoxedError;

        fn fetch_appointments(
            &self,
            prison_code: &str,
            date: NaiveDate,
            location_keys: &[String],
        ) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error> {
            let matching: Vec<AppointmentRecord> = self
                .records
                .iter()
                .filter(|record| {
                    record.prison_code == prison_code
                        && record.date == date
                        && location_keys.contains(&record.location_key)
                })
                .cloned()
                .collect();
            Box::pin(async move { Ok(matching) })
        }
    }

    /// Source that always fails, for exercising upstream-failure paths.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct FailingAppointmentSource;

    impl AppointmentSource for FailingAppointmentSource {
        type Error = BoxedError;

        fn fetch_appointments(
            &self,
            _prison_code: &str,
            _date: NaiveDate,
            _location_keys: &[String],
        ) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error> {
            Box::pin(async move {
                Err(BoxedError(Box::new(upstream_error(
                    "appointment store",
                    "simulated outage",
                ))))
            })
        }
    }
}
