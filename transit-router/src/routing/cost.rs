//! Time-dependent edge costs.
//!
//! The cost model is the only place where the query time affects travel
//! times, so every algorithm sees identical weights for identical inputs.

use crate::domain::TimeContext;
use crate::graph::Edge;

use super::config::{RoutingConfig, RoutingConfigError, RushWindow};

/// Evaluates edge weights (minutes) for a query time.
///
/// An edge's observed time for the query's `(day, period)` bucket wins when
/// the dataset has one. Otherwise the base time is used, multiplied during
/// weekday rush windows.
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    rush_multiplier: f64,
    rush_windows: Vec<RushWindow>,
}

impl CostModel {
    /// Create a cost model. The multiplier must be finite and at least 1.0.
    pub fn new(
        rush_multiplier: f64,
        rush_windows: Vec<RushWindow>,
    ) -> Result<Self, RoutingConfigError> {
        let config = RoutingConfig {
            rush_multiplier,
            rush_windows,
            ..RoutingConfig::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &RoutingConfig) -> Result<Self, RoutingConfigError> {
        config.validate()?;
        Ok(Self {
            rush_multiplier: config.rush_multiplier,
            rush_windows: config.rush_windows.clone(),
        })
    }

    /// A model with no time variation beyond observed data.
    pub fn flat() -> Self {
        Self {
            rush_multiplier: 1.0,
            rush_windows: Vec::new(),
        }
    }

    /// Multiplier applied to base times at this time.
    pub fn multiplier(&self, ctx: &TimeContext) -> f64 {
        let in_rush = ctx.is_weekday() && self.rush_windows.iter().any(|w| w.contains(ctx.time()));
        if in_rush { self.rush_multiplier } else { 1.0 }
    }

    /// Travel time along `edge` at `ctx`. Always positive.
    pub fn weight(&self, edge: &Edge, ctx: &TimeContext) -> f64 {
        edge.travel
            .observed(ctx.day(), ctx.period())
            .unwrap_or_else(|| edge.travel.base_minutes() * self.multiplier(ctx))
    }

    /// Lower bound of [`weight`](Self::weight) over every possible time.
    pub fn min_weight(&self, edge: &Edge) -> f64 {
        let base = edge.travel.base_minutes();
        match edge.travel.min_observed() {
            Some(observed) => base.min(observed),
            None => base,
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        let config = RoutingConfig::default();
        Self {
            rush_multiplier: config.rush_multiplier,
            rush_windows: config.rush_windows,
        }
    }
}
