//! Routing configuration.

use std::time::Duration;

use chrono::NaiveTime;

use super::search::SearchLimits;

/// Invalid routing configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingConfigError {
    /// Rush multiplier below 1.0 or not finite
    #[error("rush multiplier must be a finite number >= 1.0, got {0}")]
    InvalidMultiplier(f64),

    /// Window end does not come after its start
    #[error("rush window {start}-{end} is empty or inverted")]
    InvalidWindow { start: NaiveTime, end: NaiveTime },
}

/// A half-open time-of-day interval `[start, end)` during which the rush
/// multiplier applies on weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RushWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl RushWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, RoutingConfigError> {
        if end <= start {
            return Err(RoutingConfigError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window between two whole hours.
    pub fn hours(start: u32, end: u32) -> Option<Self> {
        let start = NaiveTime::from_hms_opt(start, 0, 0)?;
        let end = NaiveTime::from_hms_opt(end, 0, 0)?;
        Self::new(start, end).ok()
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// Configuration parameters for cost evaluation and search.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    /// Multiplier applied to base travel times inside rush windows.
    pub rush_multiplier: f64,

    /// Weekday rush windows.
    pub rush_windows: Vec<RushWindow>,

    /// Maximum stations a single search may finalize.
    pub max_expansions: Option<usize>,

    /// Wall-clock budget for a single search (milliseconds).
    pub max_search_ms: Option<u64>,

    /// Run both algorithms of a comparison concurrently.
    pub parallel_compare: bool,
}

impl RoutingConfig {
    /// Check the values that the cost model and heuristic rely on.
    pub fn validate(&self) -> Result<(), RoutingConfigError> {
        if !self.rush_multiplier.is_finite() || self.rush_multiplier < 1.0 {
            return Err(RoutingConfigError::InvalidMultiplier(self.rush_multiplier));
        }
        for w in &self.rush_windows {
            RushWindow::new(w.start, w.end)?;
        }
        Ok(())
    }

    /// Per-search resource limits.
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
            max_duration: self.max_search_ms.map(Duration::from_millis),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            rush_multiplier: 1.4,
            rush_windows: [(7, 9), (16, 18)]
                .into_iter()
                .filter_map(|(start, end)| RushWindow::hours(start, end))
                .collect(),
            max_expansions: None,
            max_search_ms: Some(5_000),
            parallel_compare: false,
        }
    }
}
