//! Query time handling.
//!
//! Edge costs depend on when a journey is made. A query carries a
//! [`TimeContext`]: the day of the week and the time of day. Observed travel
//! times in the dataset are bucketed by day and [`TimePeriod`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};

use super::DomainError;

/// Coarse time-of-day bucket used by the travel-time dataset.
///
/// Boundaries are on the hour:
///
/// | Period | From | To |
/// |---|---|---|
/// | `morning_rush` | 05:00 | 09:00 |
/// | `midday` | 09:00 | 16:00 |
/// | `evening_rush` | 16:00 | 20:00 |
/// | `late_night` | 20:00 | 05:00 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePeriod {
    MorningRush,
    Midday,
    EveningRush,
    LateNight,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::MorningRush,
        TimePeriod::Midday,
        TimePeriod::EveningRush,
        TimePeriod::LateNight,
    ];

    /// The period containing the given time of day.
    pub fn of(time: NaiveTime) -> Self {
        match time.hour() {
            5..=8 => TimePeriod::MorningRush,
            9..=15 => TimePeriod::Midday,
            16..=19 => TimePeriod::EveningRush,
            _ => TimePeriod::LateNight,
        }
    }

    /// Dataset label for this period.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::MorningRush => "morning_rush",
            TimePeriod::Midday => "midday",
            TimePeriod::EveningRush => "evening_rush",
            TimePeriod::LateNight => "late_night",
        }
    }
}

impl FromStr for TimePeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        TimePeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownPeriod(s.to_string()))
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a day of week.
///
/// Accepts `1`..=`7` (Monday = 1) or an English day name, full or
/// abbreviated, in any case.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use transit_router::domain::parse_weekday;
///
/// assert_eq!(parse_weekday("1").unwrap(), Weekday::Mon);
/// assert_eq!(parse_weekday("7").unwrap(), Weekday::Sun);
/// assert_eq!(parse_weekday("saturday").unwrap(), Weekday::Sat);
/// assert!(parse_weekday("8").is_err());
/// ```
pub fn parse_weekday(s: &str) -> Result<Weekday, DomainError> {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<u8>() {
        return weekday_from_number(n);
    }
    Weekday::from_str(trimmed).map_err(|_| DomainError::InvalidDay(s.to_string()))
}

/// Convert an ISO day number (Monday = 1, Sunday = 7).
pub fn weekday_from_number(n: u8) -> Result<Weekday, DomainError> {
    match n {
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        7 => Ok(Weekday::Sun),
        _ => Err(DomainError::InvalidDay(n.to_string())),
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// When a query is made: day of week and time of day.
///
/// Used only to evaluate edge costs for a single query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeContext {
    day: Weekday,
    time: NaiveTime,
}

impl TimeContext {
    pub fn new(day: Weekday, time: NaiveTime) -> Self {
        Self { day, time }
    }

    /// Build a context from `HH:MM` on the given day.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Weekday;
    /// use transit_router::domain::{TimeContext, TimePeriod};
    ///
    /// let ctx = TimeContext::at(Weekday::Tue, 8, 15).unwrap();
    /// assert_eq!(ctx.period(), TimePeriod::MorningRush);
    /// assert!(ctx.is_weekday());
    /// ```
    pub fn at(day: Weekday, hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self { day, time })
    }

    /// Normalize request time fields into a context.
    ///
    /// `time` may be `HH:MM`, `HH:MM:SS`, or a date-time
    /// (`YYYY-MM-DDTHH:MM[:SS]`, `T` or space separated). A date-time fixes
    /// the weekday; an explicit `day` takes precedence over it. Missing or
    /// blank fields fall back to `now`.
    pub fn resolve(
        time: Option<&str>,
        day: Option<Weekday>,
        now: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        let time = time.map(str::trim).filter(|t| !t.is_empty());

        let Some(raw) = time else {
            return Ok(Self {
                day: day.unwrap_or_else(|| now.weekday()),
                time: now.time(),
            });
        };

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(Self {
                    day: day.unwrap_or_else(|| dt.weekday()),
                    time: dt.time(),
                });
            }
        }

        for format in TIME_FORMATS {
            if let Ok(t) = NaiveTime::parse_from_str(raw, format) {
                return Ok(Self {
                    day: day.unwrap_or_else(|| now.weekday()),
                    time: t,
                });
            }
        }

        Err(DomainError::InvalidTime(raw.to_string()))
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn period(&self) -> TimePeriod {
        TimePeriod::of(self.time)
    }

    /// Monday to Friday.
    pub fn is_weekday(&self) -> bool {
        !matches!(self.day, Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for TimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.time.format("%H:%M"))
    }
}
