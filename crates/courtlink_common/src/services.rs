// --- File: crates/courtlink_common/src/services.rs ---
//! Service abstractions for upstream appointment data.
//!
//! This module defines the capability the availability engine depends on to
//! learn which appointments already exist at a prison. The engine never talks
//! to storage or to the external activities system directly; it is handed an
//! implementation of [`AppointmentSource`] by the surrounding application,
//! which keeps the engine storage-agnostic and unit-testable with in-memory
//! fixtures.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Lifecycle state of an upstream appointment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// The appointment is live and occupies its room.
    Active,
    /// The appointment has been cancelled and never counts as a conflict.
    Cancelled,
}

/// One raw appointment row as reported by an upstream source.
///
/// This is the wire-level shape both the internal appointment store and the
/// external activities-scheduling system are adapted to. The booked-index
/// builder filters and validates these rows; sources report what they have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    /// Identifier of the video-link booking that owns this appointment.
    pub booking_id: i64,
    /// Prison the appointment belongs to.
    pub prison_code: String,
    /// Key of the room the appointment occupies.
    pub location_key: String,
    /// The day the appointment takes place.
    pub date: NaiveDate,
    /// Start of the occupied interval (prison-local time of day).
    pub start_time: NaiveTime,
    /// End of the occupied interval, exclusive.
    pub end_time: NaiveTime,
    /// Lifecycle state; only [`AppointmentStatus::Active`] rows block a room.
    pub status: AppointmentStatus,
}

/// A trait for looking up existing appointments at a prison.
///
/// Implementations cover the internal appointment store and the external
/// activities-scheduling system; which one serves a given prison is a
/// configuration concern handled outside the engine.
pub trait AppointmentSource: Send + Sync {
    /// Error type returned by appointment lookups.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch every appointment at `prison_code` on `date` for the given rooms.
    ///
    /// Implementations may return rows for rooms that were not asked for, or
    /// cancelled rows; the caller filters. A failure here is fatal to the
    /// availability check in progress since there is no safe default for
    /// "unknown occupancy".
    fn fetch_appointments(
        &self,
        prison_code: &str,
        date: NaiveDate,
        location_keys: &[String],
    ) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error>;
}
