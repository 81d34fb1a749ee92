//! A routable network snapshot.

use chrono::NaiveDateTime;

use crate::graph::{Graph, StationId};

use super::compare::{Comparator, ComparisonResult};
use super::config::{RoutingConfig, RoutingConfigError};
use super::cost::CostModel;
use super::error::RouteError;
use super::heuristic::GreatCircleHeuristic;
use super::query::RouteQuery;
use super::search::{Algorithm, SearchEngine, SearchLimits, SearchResult};

/// Graph, cost model and heuristic built together and never changed.
///
/// Shared read-only by every request; a reload builds a new `Network`.
#[derive(Debug)]
pub struct Network {
    graph: Graph,
    cost: CostModel,
    heuristic: GreatCircleHeuristic,
    limits: SearchLimits,
    parallel_compare: bool,
}

impl Network {
    pub fn new(graph: Graph, config: &RoutingConfig) -> Result<Self, RoutingConfigError> {
        let cost = CostModel::from_config(config)?;
        let heuristic = GreatCircleHeuristic::new(&graph, &cost);
        Ok(Self {
            graph,
            cost,
            heuristic,
            limits: config.limits(),
            parallel_compare: config.parallel_compare,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn engine(&self) -> SearchEngine<'_> {
        SearchEngine::new(&self.graph, &self.cost, &self.heuristic).with_limits(self.limits)
    }

    pub fn comparator(&self) -> Comparator<'_> {
        Comparator::new(self.engine()).parallel(self.parallel_compare)
    }

    /// Validate raw request fields against this network.
    pub fn query(
        &self,
        start: &str,
        end: &str,
        time: Option<&str>,
        day: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<RouteQuery, RouteError> {
        RouteQuery::from_request(&self.graph, start, end, time, day, now)
    }

    /// Shortest route, by Dijkstra.
    pub fn find_route(&self, query: &RouteQuery) -> Result<SearchResult, RouteError> {
        self.engine().run(Algorithm::Dijkstra, query)
    }

    pub fn compare(&self, query: &RouteQuery) -> Result<ComparisonResult, RouteError> {
        self.comparator().compare(query)
    }

    /// Station names for a sequence of ids.
    pub fn names(&self, ids: &[StationId]) -> Vec<String> {
        ids.iter().map(|id| self.graph.name(*id).to_string()).collect()
    }
}
