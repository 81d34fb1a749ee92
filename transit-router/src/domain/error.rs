//! Domain error types.
//!
//! These errors represent validation failures of individual values
//! (stations, travel times, time strings). They are distinct from
//! graph-level and query-level errors.

/// Domain-level errors for value validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station name is empty after trimming
    #[error("station name must not be empty")]
    EmptyStationName,

    /// Latitude or longitude is out of range or not finite
    #[error("invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates { lat: f64, lon: f64 },

    /// Travel time is zero, negative, or not finite
    #[error("invalid travel time {0}: must be a positive number of minutes")]
    InvalidTravelTime(f64),

    /// Unrecognised time-of-day period label
    #[error("unknown time period: {0}")]
    UnknownPeriod(String),

    /// Unrecognised day of week
    #[error("invalid day of week: {0}")]
    InvalidDay(String),

    /// Time string in none of the accepted formats
    #[error("invalid time {0:?}: expected HH:MM, HH:MM:SS or YYYY-MM-DDTHH:MM[:SS]")]
    InvalidTime(String),
}
