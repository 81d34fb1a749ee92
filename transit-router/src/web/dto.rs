//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::routing::{Algorithm, ComparisonResult, Network, SearchResult, Winner};

/// Body of `POST /api/find-route` and `POST /api/compare-algorithms`.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Start station name
    pub start_station: String,

    /// End station name
    pub end_station: String,

    /// `HH:MM`, `HH:MM:SS` or `YYYY-MM-DDTHH:MM[:SS]` (defaults to now)
    #[serde(default)]
    pub time: Option<String>,

    /// Day of week, 1 = Monday or a name (defaults to today)
    #[serde(default)]
    pub day: Option<DayField>,
}

/// A day given as a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DayField {
    Number(i64),
    Text(String),
}

impl DayField {
    pub fn to_text(&self) -> String {
        match self {
            DayField::Number(n) => n.to_string(),
            DayField::Text(s) => s.clone(),
        }
    }
}

/// Response of `POST /api/find-route`.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub route: Vec<String>,
    pub estimated_time_minutes: f64,
}

impl RouteResponse {
    pub fn from_result(network: &Network, result: &SearchResult) -> Self {
        Self {
            route: network.names(&result.route),
            estimated_time_minutes: result.cost_minutes,
        }
    }
}

/// One algorithm's side of a comparison.
#[derive(Debug, Serialize)]
pub struct AlgorithmResult {
    pub route: Vec<String>,
    pub estimated_time_minutes: f64,
    pub stations_explored: usize,

    /// Search wall time in fractional milliseconds
    pub execution_time_ms: f64,

    /// Stations in the order their cost became final
    pub exploration_steps: Vec<String>,

    pub algorithm: Algorithm,
}

impl AlgorithmResult {
    pub fn from_result(network: &Network, result: &SearchResult) -> Self {
        Self {
            route: network.names(&result.route),
            estimated_time_minutes: result.cost_minutes,
            stations_explored: result.stations_explored(),
            execution_time_ms: result.elapsed.as_secs_f64() * 1000.0,
            exploration_steps: network.names(&result.trace),
            algorithm: result.algorithm,
        }
    }
}

/// Response of `POST /api/compare-algorithms`.
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub dijkstra: AlgorithmResult,
    pub astar: AlgorithmResult,
    pub winner: Winner,
    pub performance_metrics: crate::routing::PerformanceMetrics,
}

impl ComparisonResponse {
    pub fn from_comparison(network: &Network, comparison: &ComparisonResult) -> Self {
        Self {
            dijkstra: AlgorithmResult::from_result(network, &comparison.dijkstra),
            astar: AlgorithmResult::from_result(network, &comparison.astar),
            winner: comparison.winner,
            performance_metrics: comparison.metrics,
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub stations: usize,
    pub edges: usize,
}

/// Response of `POST /api/reload`.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub status: &'static str,
    pub stations: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: &'static str,

    /// Human-readable detail
    pub message: String,
}
