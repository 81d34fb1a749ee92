//! Edge travel-time data.

use std::collections::HashMap;

use chrono::Weekday;

use super::{DomainError, TimePeriod};

fn validate_minutes(minutes: f64) -> Result<f64, DomainError> {
    if minutes.is_finite() && minutes > 0.0 {
        Ok(minutes)
    } else {
        Err(DomainError::InvalidTravelTime(minutes))
    }
}

/// Travel time along one directed edge.
///
/// Holds a base time plus optional observed times for specific
/// `(day, period)` buckets. All values are positive minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTimes {
    base_minutes: f64,
    observed: HashMap<(Weekday, TimePeriod), f64>,
}

impl TravelTimes {
    /// Create travel times with only a base value.
    pub fn new(base_minutes: f64) -> Result<Self, DomainError> {
        Ok(Self {
            base_minutes: validate_minutes(base_minutes)?,
            observed: HashMap::new(),
        })
    }

    /// Record the observed time for a day and period, replacing any earlier value.
    pub fn with_observed(
        mut self,
        day: Weekday,
        period: TimePeriod,
        minutes: f64,
    ) -> Result<Self, DomainError> {
        self.observed
            .insert((day, period), validate_minutes(minutes)?);
        Ok(self)
    }

    pub fn base_minutes(&self) -> f64 {
        self.base_minutes
    }

    /// Observed time for this bucket, if the dataset has one.
    pub fn observed(&self, day: Weekday, period: TimePeriod) -> Option<f64> {
        self.observed.get(&(day, period)).copied()
    }

    /// Smallest observed time, if any.
    pub fn min_observed(&self) -> Option<f64> {
        self.observed.values().copied().reduce(f64::min)
    }

    /// Number of observed buckets.
    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }
}

/// A directed edge as it arrives from the dataset, endpoints by station name.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub travel: TravelTimes,
}

impl EdgeSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>, travel: TravelTimes) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            travel,
        }
    }

    /// An edge with only a base travel time.
    pub fn with_minutes(
        from: impl Into<String>,
        to: impl Into<String>,
        minutes: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(from, to, TravelTimes::new(minutes)?))
    }

    /// The same connection in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            travel: self.travel.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_only() {
        let t = TravelTimes::new(2.5).unwrap();
        assert_eq!(t.base_minutes(), 2.5);
        assert_eq!(t.observed(Weekday::Mon, TimePeriod::Midday), None);
        assert_eq!(t.min_observed(), None);
        assert_eq!(t.observed_len(), 0);
    }

    #[test]
    fn reject_non_positive() {
        assert!(TravelTimes::new(0.0).is_err());
        assert!(TravelTimes::new(-3.0).is_err());
        assert!(TravelTimes::new(f64::NAN).is_err());
        assert!(TravelTimes::new(f64::INFINITY).is_err());
        assert!(
            TravelTimes::new(1.0)
                .unwrap()
                .with_observed(Weekday::Mon, TimePeriod::Midday, 0.0)
                .is_err()
        );
    }

    #[test]
    fn observed_lookup_and_min() {
        let t = TravelTimes::new(4.0)
            .unwrap()
            .with_observed(Weekday::Mon, TimePeriod::MorningRush, 6.0)
            .unwrap()
            .with_observed(Weekday::Sat, TimePeriod::LateNight, 3.0)
            .unwrap();
        assert_eq!(t.observed(Weekday::Mon, TimePeriod::MorningRush), Some(6.0));
        assert_eq!(t.observed(Weekday::Mon, TimePeriod::Midday), None);
        assert_eq!(t.min_observed(), Some(3.0));
        assert_eq!(t.observed_len(), 2);
    }

    #[test]
    fn later_observation_replaces_earlier() {
        let t = TravelTimes::new(4.0)
            .unwrap()
            .with_observed(Weekday::Tue, TimePeriod::Midday, 6.0)
            .unwrap()
            .with_observed(Weekday::Tue, TimePeriod::Midday, 5.0)
            .unwrap();
        assert_eq!(t.observed(Weekday::Tue, TimePeriod::Midday), Some(5.0));
        assert_eq!(t.observed_len(), 1);
    }

    #[test]
    fn reversed_swaps_endpoints() {
        let e = EdgeSpec::with_minutes("A", "B", 5.0).unwrap();
        let r = e.reversed();
        assert_eq!(r.from, "B");
        assert_eq!(r.to, "A");
        assert_eq!(r.travel, e.travel);
    }
}
