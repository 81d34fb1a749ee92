//! Routing engine.
//!
//! Cost evaluation, heuristics, the shared best-first search behind both
//! Dijkstra and A*, and the comparison of the two on one query.

mod compare;
mod config;
mod cost;
mod error;
mod heuristic;
mod network;
mod query;
mod search;


pub use compare::{COST_EPSILON, Comparator, ComparisonResult, PerformanceMetrics, Winner};
pub use config::{RoutingConfig, RoutingConfigError, RushWindow};
pub use cost::CostModel;
pub use error::RouteError;
pub use heuristic::{GreatCircleHeuristic, Heuristic, ZeroHeuristic};
pub use network::Network;
pub use query::RouteQuery;
pub use search::{Algorithm, SearchEngine, SearchLimits, SearchResult};
