//! The station graph.
//!
//! An immutable adjacency list of stations and directed, weighted edges.
//! A [`Graph`] is built once from finished dataset rows and then only read;
//! replacing the network means building a new graph.

mod error;

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::domain::{EdgeSpec, Station, TravelTimes};

pub use error::MalformedGraph;

/// Dense index of a station within one [`Graph`].
///
/// Only meaningful for the graph that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub(crate) usize);

impl StationId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

/// A directed edge between two stations of the same graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: StationId,
    pub to: StationId,
    pub travel: TravelTimes,
}

/// Read-only transit network.
#[derive(Debug, Clone)]
pub struct Graph {
    stations: Vec<Station>,
    by_name: HashMap<String, StationId>,
    /// Case-folded name lookup; `None` marks names that fold together.
    by_folded_name: HashMap<String, Option<StationId>>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Build a graph from stations and edges.
///
/// Equivalent to [`Graph::build`].
pub fn build_graph(stations: Vec<Station>, edges: Vec<EdgeSpec>) -> Result<Graph, MalformedGraph> {
    Graph::build(stations, edges)
}

impl Graph {
    /// Build a graph.
    ///
    /// Station names must be unique, every edge endpoint must name a
    /// station, and each ordered pair may carry at most one edge. Neighbour
    /// order is the order edges appear in `edges`.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_router::domain::{Coordinates, EdgeSpec, Station};
    /// use transit_router::graph::Graph;
    ///
    /// let at = |lat| Coordinates::new(lat, 0.0).unwrap();
    /// let stations = vec![
    ///     Station::new("A", at(0.0)).unwrap(),
    ///     Station::new("B", at(0.01)).unwrap(),
    /// ];
    /// let edges = vec![EdgeSpec::with_minutes("A", "B", 2.0).unwrap()];
    ///
    /// let graph = Graph::build(stations, edges).unwrap();
    /// assert!(graph.contains("A"));
    /// assert_eq!(graph.edge_count(), 1);
    ///
    /// let bad = vec![EdgeSpec::with_minutes("A", "Z", 2.0).unwrap()];
    /// let stations = vec![Station::new("A", at(0.0)).unwrap()];
    /// assert!(Graph::build(stations, bad).is_err());
    /// ```
    pub fn build(stations: Vec<Station>, edges: Vec<EdgeSpec>) -> Result<Self, MalformedGraph> {
        let mut by_name = HashMap::with_capacity(stations.len());
        let mut by_folded_name: HashMap<String, Option<StationId>> =
            HashMap::with_capacity(stations.len());

        for (idx, station) in stations.iter().enumerate() {
            let id = StationId(idx);
            if by_name.insert(station.name().to_string(), id).is_some() {
                return Err(MalformedGraph::DuplicateStation(station.name().to_string()));
            }
            by_folded_name
                .entry(fold(station.name()))
                .and_modify(|slot| *slot = None)
                .or_insert(Some(id));
        }

        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); stations.len()];
        let mut seen: HashSet<(StationId, StationId)> = HashSet::with_capacity(edges.len());

        for spec in edges {
            let lookup = |name: &str| {
                by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| MalformedGraph::UnknownEndpoint {
                        from: spec.from.clone(),
                        to: spec.to.clone(),
                        missing: name.to_string(),
                    })
            };
            let from = lookup(&spec.from)?;
            let to = lookup(&spec.to)?;

            if !seen.insert((from, to)) {
                return Err(MalformedGraph::DuplicateEdge {
                    from: spec.from,
                    to: spec.to,
                });
            }

            adjacency[from.0].push(Edge {
                from,
                to,
                travel: spec.travel,
            });
        }

        Ok(Self {
            stations,
            by_name,
            by_folded_name,
            adjacency,
            edge_count: seen.len(),
        })
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether a station with exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Exact name lookup.
    pub fn station_id(&self, name: &str) -> Option<StationId> {
        self.by_name.get(name).copied()
    }

    /// Name lookup that falls back to a case-insensitive, trimmed match.
    ///
    /// The fallback only succeeds when exactly one station folds to the
    /// given name.
    pub fn resolve(&self, name: &str) -> Option<StationId> {
        self.station_id(name)
            .or_else(|| self.by_folded_name.get(&fold(name)).copied().flatten())
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.0)
    }

    /// Whether `id` was issued by a graph of this size.
    pub fn has_id(&self, id: StationId) -> bool {
        id.0 < self.stations.len()
    }

    /// Station name for an id; empty for ids from another graph.
    pub fn name(&self, id: StationId) -> &str {
        self.station(id).map(Station::name).unwrap_or("")
    }

    /// All stations with their ids, in insertion order.
    pub fn stations(&self) -> impl Iterator<Item = (StationId, &Station)> {
        self.stations
            .iter()
            .enumerate()
            .map(|(idx, s)| (StationId(idx), s))
    }

    /// Outgoing edges of a station, in dataset order.
    pub fn neighbors(&self, id: StationId) -> &[Edge] {
        self.adjacency.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All edges, grouped by source station.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.adjacency.iter().flatten()
    }

    /// The edge for an ordered pair, if present.
    pub fn edge_between(&self, from: StationId, to: StationId) -> Option<&Edge> {
        self.neighbors(from).iter().find(|e| e.to == to)
    }
}
