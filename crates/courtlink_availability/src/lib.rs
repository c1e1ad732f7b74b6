// --- File: crates/courtlink_availability/src/lib.rs ---
// Declare modules within this crate
pub mod booked;
pub mod error;
pub mod finder;
#[cfg(test)]
mod finder_proptest;
pub mod interval;
pub mod locations;
pub mod slots;
#[cfg(test)]
mod slots_test;
pub mod source;

pub use booked::{build_booked_locations, BookedLocation, BookedLocations};
pub use error::AvailabilityError;
pub use finder::{
    check_availability, check_request, AlternativeOption, AvailabilityOptions,
    AvailabilityRequest, AvailabilityResponse, BookingType,
};
pub use interval::{Interval, LocationInterval};
pub use locations::{find_available_locations, AvailableLocation};
pub use slots::{generate_slots, DayPart};
