//! Head-to-head comparison of Dijkstra and A*.

use serde::Serialize;

use super::error::RouteError;
use super::query::RouteQuery;
use super::search::{Algorithm, SearchEngine, SearchResult};

/// Costs closer than this are a tie.
pub const COST_EPSILON: f64 = 1e-9;

/// Which algorithm found the cheaper route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    #[serde(rename = "tie")]
    Tie,
}

/// Derived metrics of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// `astar.cost - dijkstra.cost` (minutes).
    pub time_difference: f64,

    /// `dijkstra.explored - astar.explored`.
    pub exploration_difference: i64,

    /// `dijkstra.explored / astar.explored`; 1.0 when A* explored nothing.
    pub efficiency_ratio: f64,
}

impl PerformanceMetrics {
    pub fn between(dijkstra: &SearchResult, astar: &SearchResult) -> Self {
        let d = dijkstra.stations_explored();
        let a = astar.stations_explored();
        Self {
            time_difference: astar.cost_minutes - dijkstra.cost_minutes,
            exploration_difference: d as i64 - a as i64,
            efficiency_ratio: if a == 0 { 1.0 } else { d as f64 / a as f64 },
        }
    }
}

/// Both results for one query plus the verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub dijkstra: SearchResult,
    pub astar: SearchResult,
    pub winner: Winner,
    pub metrics: PerformanceMetrics,
}

impl ComparisonResult {
    /// Decide the winner on route cost alone.
    ///
    /// Exploration counts are reported in the metrics but never break a tie.
    pub fn new(dijkstra: SearchResult, astar: SearchResult) -> Self {
        let metrics = PerformanceMetrics::between(&dijkstra, &astar);
        let winner = if metrics.time_difference.abs() <= COST_EPSILON {
            Winner::Tie
        } else if metrics.time_difference < 0.0 {
            Winner::AStar
        } else {
            Winner::Dijkstra
        };
        Self {
            dijkstra,
            astar,
            winner,
            metrics,
        }
    }
}

/// Runs both algorithms on the same query.
#[derive(Clone, Copy)]
pub struct Comparator<'a> {
    engine: SearchEngine<'a>,
    parallel: bool,
}

impl<'a> Comparator<'a> {
    pub fn new(engine: SearchEngine<'a>) -> Self {
        Self {
            engine,
            parallel: false,
        }
    }

    /// Run the two searches concurrently. Each is still timed on its own.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Compare Dijkstra and A* on `query`.
    ///
    /// If either search fails, the Dijkstra error is reported first.
    pub fn compare(&self, query: &RouteQuery) -> Result<ComparisonResult, RouteError> {
        let engine = &self.engine;
        let (dijkstra, astar) = if self.parallel {
            rayon::join(
                || engine.run(Algorithm::Dijkstra, query),
                || engine.run(Algorithm::AStar, query),
            )
        } else {
            (
                engine.run(Algorithm::Dijkstra, query),
                engine.run(Algorithm::AStar, query),
            )
        };
        Ok(ComparisonResult::new(dijkstra?, astar?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StationId;
    use std::time::Duration;

    fn result(algorithm: Algorithm, cost: f64, explored: usize) -> SearchResult {
        SearchResult {
            algorithm,
            route: vec![StationId(0)],
            cost_minutes: cost,
            trace: (0..explored).map(StationId).collect(),
            elapsed: Duration::from_micros(10),
        }
    }

    #[test]
    fn cheaper_astar_wins() {
        let c = ComparisonResult::new(
            result(Algorithm::Dijkstra, 10.0, 8),
            result(Algorithm::AStar, 9.0, 4),
        );
        assert_eq!(c.winner, Winner::AStar);
        assert_eq!(c.metrics.time_difference, -1.0);
        assert_eq!(c.metrics.exploration_difference, 4);
        assert_eq!(c.metrics.efficiency_ratio, 2.0);
    }

    #[test]
    fn cheaper_dijkstra_wins() {
        let c = ComparisonResult::new(
            result(Algorithm::Dijkstra, 6.0, 4),
            result(Algorithm::AStar, 7.5, 2),
        );
        assert_eq!(c.winner, Winner::Dijkstra);
        assert_eq!(c.metrics.time_difference, 1.5);
    }

    #[test]
    fn equal_cost_is_a_tie_regardless_of_exploration() {
        let c = ComparisonResult::new(
            result(Algorithm::Dijkstra, 6.0, 10),
            result(Algorithm::AStar, 6.0 + 1e-12, 2),
        );
        assert_eq!(c.winner, Winner::Tie);
        assert_eq!(c.metrics.exploration_difference, 8);
    }

    #[test]
    fn exploration_difference_can_be_negative() {
        let c = ComparisonResult::new(
            result(Algorithm::Dijkstra, 6.0, 2),
            result(Algorithm::AStar, 6.0, 5),
        );
        assert_eq!(c.metrics.exploration_difference, -3);
        assert_eq!(c.metrics.efficiency_ratio, 0.4);
    }

    #[test]
    fn empty_astar_trace_gives_unit_ratio() {
        let m = PerformanceMetrics::between(
            &result(Algorithm::Dijkstra, 1.0, 3),
            &result(Algorithm::AStar, 1.0, 0),
        );
        assert_eq!(m.efficiency_ratio, 1.0);
    }

    #[test]
    fn winner_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Winner::Tie).unwrap(), "\"tie\"");
        assert_eq!(serde_json::to_string(&Winner::AStar).unwrap(), "\"astar\"");
        assert_eq!(
            serde_json::to_string(&Winner::Dijkstra).unwrap(),
            "\"dijkstra\""
        );
    }
}
