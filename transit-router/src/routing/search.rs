//! Best-first shortest-path search.
//!
//! One search loop serves both algorithms: Dijkstra is best-first search
//! with a zero heuristic, A* plugs in a lower-bound estimate of the
//! remaining cost. Everything a search allocates (frontier, cost table,
//! trace) belongs to that call; the graph is only read.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::graph::{Graph, StationId};

use super::cost::CostModel;
use super::error::RouteError;
use super::heuristic::{Heuristic, ZeroHeuristic};
use super::query::RouteQuery;

/// Which search strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caps that abort a search instead of letting it run unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of stations finalized.
    pub max_expansions: Option<usize>,

    /// Maximum wall-clock time.
    pub max_duration: Option<Duration>,
}

/// Outcome of one successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub algorithm: Algorithm,

    /// Stations from start to end inclusive.
    pub route: Vec<StationId>,

    /// Total travel time along `route` (minutes).
    pub cost_minutes: f64,

    /// Stations in the order their cost became final.
    pub trace: Vec<StationId>,

    /// Wall-clock time of the search itself.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Number of stations finalized.
    pub fn stations_explored(&self) -> usize {
        self.trace.len()
    }
}

/// Frontier entry. Ordered so that `BinaryHeap` pops the lowest priority
/// first and, among equal priorities, the entry pushed first.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    priority: f64,
    seq: u64,
    station: StationId,
    cost: f64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Runs searches over one graph and cost model.
#[derive(Clone, Copy)]
pub struct SearchEngine<'a> {
    graph: &'a Graph,
    cost: &'a CostModel,
    heuristic: &'a dyn Heuristic,
    limits: SearchLimits,
}

impl<'a> SearchEngine<'a> {
    /// Create an engine. `heuristic` is used for A* only.
    pub fn new(graph: &'a Graph, cost: &'a CostModel, heuristic: &'a dyn Heuristic) -> Self {
        Self {
            graph,
            cost,
            heuristic,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn dijkstra(&self, query: &RouteQuery) -> Result<SearchResult, RouteError> {
        self.run(Algorithm::Dijkstra, query)
    }

    pub fn astar(&self, query: &RouteQuery) -> Result<SearchResult, RouteError> {
        self.run(Algorithm::AStar, query)
    }

    /// Run one algorithm on a query.
    pub fn run(&self, algorithm: Algorithm, query: &RouteQuery) -> Result<SearchResult, RouteError> {
        for id in [query.start, query.end] {
            if !self.graph.has_id(id) {
                return Err(RouteError::UnknownStation(format!("#{}", id.index())));
            }
        }

        let heuristic: &dyn Heuristic = match algorithm {
            Algorithm::Dijkstra => &ZeroHeuristic,
            Algorithm::AStar => self.heuristic,
        };

        let started = Instant::now();
        let (route, cost_minutes, trace) = self.best_first(heuristic, query, started)?;
        let elapsed = started.elapsed();

        debug!(
            %algorithm,
            from = self.graph.name(query.start),
            to = self.graph.name(query.end),
            explored = trace.len(),
            cost_minutes,
            elapsed_us = elapsed.as_micros() as u64,
            "search complete"
        );

        Ok(SearchResult {
            algorithm,
            route,
            cost_minutes,
            trace,
            elapsed,
        })
    }

    fn best_first(
        &self,
        heuristic: &dyn Heuristic,
        query: &RouteQuery,
        started: Instant,
    ) -> Result<(Vec<StationId>, f64, Vec<StationId>), RouteError> {
        let n = self.graph.len();
        let (start, goal) = (query.start, query.end);

        let mut best = vec![f64::INFINITY; n];
        let mut predecessor: Vec<Option<StationId>> = vec![None; n];
        let mut finalized = vec![false; n];
        let mut trace = Vec::new();
        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;

        best[start.index()] = 0.0;
        frontier.push(FrontierEntry {
            priority: heuristic.estimate(start, goal),
            seq,
            station: start,
            cost: 0.0,
        });

        while let Some(entry) = frontier.pop() {
            let u = entry.station;
            // Stale entry from an earlier, worse relaxation.
            if finalized[u.index()] || entry.cost > best[u.index()] {
                continue;
            }

            if let Some(limit) = self.limits.max_expansions
                && trace.len() >= limit
            {
                return Err(RouteError::ResourceExceeded {
                    from: self.graph.name(start).to_string(),
                    to: self.graph.name(goal).to_string(),
                    limit,
                });
            }
            if let Some(budget) = self.limits.max_duration {
                let elapsed = started.elapsed();
                if elapsed >= budget {
                    return Err(RouteError::Timeout {
                        from: self.graph.name(start).to_string(),
                        to: self.graph.name(goal).to_string(),
                        elapsed_ms: elapsed.as_millis() as u64,
                    });
                }
            }

            finalized[u.index()] = true;
            trace.push(u);

            if u == goal {
                let route = reconstruct(&predecessor, start, goal);
                return Ok((route, entry.cost, trace));
            }

            for edge in self.graph.neighbors(u) {
                let v = edge.to;
                if finalized[v.index()] {
                    continue;
                }
                let candidate = entry.cost + self.cost.weight(edge, &query.context);
                if candidate < best[v.index()] {
                    best[v.index()] = candidate;
                    predecessor[v.index()] = Some(u);
                    seq += 1;
                    frontier.push(FrontierEntry {
                        priority: candidate + heuristic.estimate(v, goal),
                        seq,
                        station: v,
                        cost: candidate,
                    });
                }
            }
        }

        Err(RouteError::NoRoute {
            from: self.graph.name(start).to_string(),
            to: self.graph.name(goal).to_string(),
        })
    }
}

/// Walk predecessors back from `goal`, then reverse.
fn reconstruct(
    predecessor: &[Option<StationId>],
    start: StationId,
    goal: StationId,
) -> Vec<StationId> {
    let mut route = vec![goal];
    let mut current = goal;
    while current != start {
        match predecessor[current.index()] {
            Some(prev) => {
                route.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    route.reverse();
    route
}
