// --- File: crates/courtlink_common/src/models.rs ---
//! Shared data models used across the Courtlink crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a video-link room may be used for.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomUsage {
    Court,
    Probation,
    Shared,
}

/// Metadata for one video-link room at a prison.
///
/// Room metadata is owned by the surrounding application (it comes from the
/// prison estate's location register); the engine only reads it.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Stable business key of the room, e.g. "BMI-VIDEOLINK-01".
    pub key: String,
    /// Location register identifier for the room.
    pub id: Uuid,
    /// Human-readable room name.
    pub name: String,
    /// What the room may be used for; None means unrestricted.
    pub usage: Option<RoomUsage>,
}
