//! Domain types for the transit router.
//!
//! This module contains the value types that describe the network and a
//! query's time context. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod edge;
mod error;
mod station;
mod time;

pub use edge::{EdgeSpec, TravelTimes};
pub use error::DomainError;
pub use station::{Coordinates, Station};
pub use time::{TimeContext, TimePeriod, parse_weekday, weekday_from_number};
