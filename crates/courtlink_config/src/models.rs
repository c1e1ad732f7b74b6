// --- File: crates/courtlink_config/src/models.rs ---

use chrono::NaiveTime;
use config::ConfigError;
use serde::{Deserialize, Serialize};

// --- Availability engine defaults ---
// Times are kept as "HH:MM" strings in the config file and parsed on access,
// so a malformed value fails loudly at the call site rather than silently
// shifting a prison's operating day.

const DEFAULT_DAY_START: &str = "09:00";
const DEFAULT_DAY_END: &str = "16:00";
const DEFAULT_MIDDAY: &str = "12:00";
const DEFAULT_SLOT_STEP_MINUTES: i64 = 15;
const DEFAULT_MAX_ALTERNATIVES: usize = 3;

fn parse_time(value: &str, field: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|err| ConfigError::Message(format!("invalid {field} time '{value}': {err}")))
}

// --- Availability Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AvailabilityConfig {
    /// Start of the bookable day, "HH:MM". Defaults to 09:00.
    pub day_start: Option<String>,
    /// End of the bookable day, "HH:MM". Defaults to 16:00.
    pub day_end: Option<String>,
    /// Boundary between the morning and afternoon day parts. Defaults to 12:00.
    pub midday: Option<String>,
    /// Step between candidate slot starts, in minutes. Defaults to 15.
    pub slot_step_minutes: Option<i64>,
    /// Maximum number of alternatives returned on a conflict. Defaults to 3.
    pub max_alternatives: Option<usize>,
}

impl AvailabilityConfig {
    pub fn day_start_time(&self) -> Result<NaiveTime, ConfigError> {
        parse_time(
            self.day_start.as_deref().unwrap_or(DEFAULT_DAY_START),
            "day_start",
        )
    }

    pub fn day_end_time(&self) -> Result<NaiveTime, ConfigError> {
        parse_time(self.day_end.as_deref().unwrap_or(DEFAULT_DAY_END), "day_end")
    }

    pub fn midday_time(&self) -> Result<NaiveTime, ConfigError> {
        parse_time(self.midday.as_deref().unwrap_or(DEFAULT_MIDDAY), "midday")
    }

    pub fn slot_step_minutes(&self) -> i64 {
        self.slot_step_minutes.unwrap_or(DEFAULT_SLOT_STEP_MINUTES)
    }

    pub fn max_alternatives(&self) -> usize {
        self.max_alternatives.unwrap_or(DEFAULT_MAX_ALTERNATIVES)
    }
}

// --- Per-prison Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrisonConfig {
    /// Prison code, e.g. "BMI".
    pub code: String,
    /// Override of the workspace-wide day window start for this prison.
    pub day_start: Option<String>,
    /// Override of the workspace-wide day window end for this prison.
    pub day_end: Option<String>,
    /// Route appointment lookups for this prison to the external
    /// activities-scheduling service instead of the internal store.
    #[serde(default)]
    pub use_activities_source: bool,
}

impl PrisonConfig {
    pub fn day_start_time(&self) -> Result<Option<NaiveTime>, ConfigError> {
        self.day_start
            .as_deref()
            .map(|value| parse_time(value, "day_start"))
            .transpose()
    }

    pub fn day_end_time(&self) -> Result<Option<NaiveTime>, ConfigError> {
        self.day_end
            .as_deref()
            .map(|value| parse_time(value, "day_end"))
            .transpose()
    }
}

// --- Activities-scheduling service Config ---
// Holds the non-secret connection settings for the external activities
// system. Credentials are the host application's concern.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActivitiesConfig {
    /// Base URL of the activities-scheduling API.
    pub base_url: String,
    /// Request timeout in seconds; falls back to the shared client default.
    pub timeout_secs: Option<u64>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub availability: AvailabilityConfig,

    /// Per-prison overrides; prisons without an entry use the defaults.
    #[serde(default)]
    pub prisons: Vec<PrisonConfig>,

    /// Connection settings for the external activities system, when any
    /// prison is routed to it.
    #[serde(default)]
    pub activities: Option<ActivitiesConfig>,
}

impl AppConfig {
    /// Look up the per-prison configuration entry, if one exists.
    pub fn prison(&self, code: &str) -> Option<&PrisonConfig> {
        self.prisons.iter().find(|prison| prison.code == code)
    }
}
