//! Lower-bound estimates of remaining travel time, used by A*.

use geo::{Distance, Haversine, Point};

use crate::graph::{Graph, StationId};

use super::cost::CostModel;

/// Relative margin taken off estimates so rounding in the distance
/// computation cannot push an estimate above the true remaining cost.
const ROUNDING_MARGIN: f64 = 1e-9;

/// Estimates the remaining cost from one station to another.
///
/// Implementations used for A* must be admissible (never above the true
/// cheapest cost) and consistent (`h(u) <= w(u, v) + h(v)` for every edge).
pub trait Heuristic: Send + Sync {
    fn estimate(&self, from: StationId, to: StationId) -> f64;
}

/// Always zero. Turns best-first search into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _from: StationId, _to: StationId) -> f64 {
        0.0
    }
}

/// Great-circle distance divided by the fastest speed of any edge.
///
/// The fastest speed is taken over every edge's minimum possible weight
/// under the cost model, so no edge covers ground faster than the estimate
/// assumes. That makes the estimate admissible and, because great-circle
/// distance obeys the triangle inequality, consistent.
#[derive(Debug, Clone)]
pub struct GreatCircleHeuristic {
    points: Vec<Point<f64>>,
    minutes_per_meter: f64,
}

impl GreatCircleHeuristic {
    pub fn new(graph: &Graph, cost: &CostModel) -> Self {
        let points: Vec<Point<f64>> = graph
            .stations()
            .map(|(_, s)| s.coordinates().to_point())
            .collect();

        let max_speed = graph
            .edges()
            .filter_map(|edge| {
                let meters = Haversine.distance(points[edge.from.index()], points[edge.to.index()]);
                (meters > 0.0).then(|| meters / cost.min_weight(edge))
            })
            .fold(0.0_f64, f64::max);

        let minutes_per_meter = if max_speed > 0.0 {
            (1.0 - ROUNDING_MARGIN) / max_speed
        } else {
            0.0
        };

        Self {
            points,
            minutes_per_meter,
        }
    }

    /// Fastest speed found in the graph, in meters per minute.
    pub fn max_speed(&self) -> Option<f64> {
        (self.minutes_per_meter > 0.0).then(|| (1.0 - ROUNDING_MARGIN) / self.minutes_per_meter)
    }
}

impl Heuristic for GreatCircleHeuristic {
    fn estimate(&self, from: StationId, to: StationId) -> f64 {
        match (self.points.get(from.index()), self.points.get(to.index())) {
            (Some(a), Some(b)) => Haversine.distance(*a, *b) * self.minutes_per_meter,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, EdgeSpec, Station};

    fn station(name: &str, lat: f64, lon: f64) -> Station {
        Station::new(name, Coordinates::new(lat, lon).unwrap()).unwrap()
    }

    fn line_graph() -> Graph {
        // Three stations on the equator; B-C is the fast edge.
        Graph::build(
            vec![
                station("A", 0.0, 0.0),
                station("B", 0.0, 0.01),
                station("C", 0.0, 0.03),
            ],
            vec![
                EdgeSpec::with_minutes("A", "B", 4.0).unwrap(),
                EdgeSpec::with_minutes("B", "C", 2.0).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn zero_is_zero() {
        let g = line_graph();
        let a = g.station_id("A").unwrap();
        let c = g.station_id("C").unwrap();
        assert_eq!(ZeroHeuristic.estimate(a, c), 0.0);
    }

    #[test]
    fn speed_comes_from_fastest_edge() {
        let g = line_graph();
        let h = GreatCircleHeuristic::new(&g, &CostModel::flat());
        let b = g.station_id("B").unwrap();
        let c = g.station_id("C").unwrap();

        let bc = Haversine.distance(
            g.station(b).unwrap().coordinates().to_point(),
            g.station(c).unwrap().coordinates().to_point(),
        );
        let speed = h.max_speed().unwrap();
        assert!((speed - bc / 2.0).abs() < 1e-6);
        // Along the fastest edge the estimate is (almost) exact.
        assert!((h.estimate(b, c) - 2.0).abs() < 1e-6);
        assert!(h.estimate(b, c) <= 2.0);
    }

    #[test]
    fn estimate_is_admissible_on_line() {
        let g = line_graph();
        let h = GreatCircleHeuristic::new(&g, &CostModel::flat());
        let a = g.station_id("A").unwrap();
        let c = g.station_id("C").unwrap();
        // True cost A -> C is 6.
        assert!(h.estimate(a, c) <= 6.0);
        assert!(h.estimate(a, c) > 0.0);
        assert_eq!(h.estimate(c, c), 0.0);
    }

    #[test]
    fn consistent_across_edges() {
        let g = line_graph();
        let cost = CostModel::default();
        let h = GreatCircleHeuristic::new(&g, &cost);
        for goal in g.stations().map(|(id, _)| id) {
            for e in g.edges() {
                assert!(h.estimate(e.from, goal) <= cost.min_weight(e) + h.estimate(e.to, goal) + 1e-9);
            }
        }
    }

    #[test]
    fn degenerate_graph_gives_zero() {
        // All stations share a position: no usable speed.
        let g = Graph::build(
            vec![station("A", 1.0, 1.0), station("B", 1.0, 1.0)],
            vec![EdgeSpec::with_minutes("A", "B", 1.0).unwrap()],
        )
        .unwrap();
        let h = GreatCircleHeuristic::new(&g, &CostModel::flat());
        assert_eq!(h.max_speed(), None);
        let a = g.station_id("A").unwrap();
        let b = g.station_id("B").unwrap();
        assert_eq!(h.estimate(a, b), 0.0);
    }

    #[test]
    fn foreign_ids_estimate_zero() {
        let g = line_graph();
        let h = GreatCircleHeuristic::new(&g, &CostModel::flat());
        assert_eq!(h.estimate(StationId(0), StationId(42)), 0.0);
    }
}
