//! Explicit station/edge JSON.
//!
//! ```json
//! {
//!   "stations": [{ "name": "A", "lat": 40.73, "lon": -73.95 }],
//!   "edges": [{
//!     "from": "A", "to": "B", "minutes": 2.0, "bidirectional": true,
//!     "variations": [{ "day": "Monday", "period": "morning_rush", "minutes": 3.1 }]
//!   }]
//! }
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::domain::{Coordinates, DomainError, EdgeSpec, Station, TimePeriod, TravelTimes, parse_weekday};
use crate::graph::MalformedGraph;

use super::{Dataset, DatasetError};

#[derive(Debug, Deserialize)]
struct NetworkFile {
    stations: Vec<StationRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
struct StationRecord {
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    minutes: f64,
    #[serde(default)]
    bidirectional: bool,
    #[serde(default)]
    variations: Vec<VariationRecord>,
}

/// A day given either as 1-7 (Monday first) or by name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DayRecord {
    Number(u8),
    Name(String),
}

#[derive(Debug, Deserialize)]
struct VariationRecord {
    day: DayRecord,
    period: String,
    minutes: f64,
}

impl StationRecord {
    fn into_station(self) -> Result<Station, DomainError> {
        Station::new(self.name, Coordinates::new(self.lat, self.lon)?)
    }
}

impl EdgeRecord {
    fn into_specs(self) -> Result<Vec<EdgeSpec>, DomainError> {
        let mut travel = TravelTimes::new(self.minutes)?;
        for v in self.variations {
            let day = match v.day {
                DayRecord::Number(n) => crate::domain::weekday_from_number(n)?,
                DayRecord::Name(name) => parse_weekday(&name)?,
            };
            let period: TimePeriod = v.period.parse()?;
            travel = travel.with_observed(day, period, v.minutes)?;
        }
        let forward = EdgeSpec::new(self.from.trim(), self.to.trim(), travel);
        Ok(if self.bidirectional {
            let back = forward.reversed();
            vec![forward, back]
        } else {
            vec![forward]
        })
    }
}

/// Read the station/edge JSON layout.
pub fn read_json<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let file: NetworkFile = serde_json::from_reader(reader)?;

    let stations = file
        .stations
        .into_iter()
        .map(StationRecord::into_station)
        .collect::<Result<Vec<_>, _>>()
        .map_err(MalformedGraph::from)?;

    let mut edges = Vec::with_capacity(file.edges.len());
    for record in file.edges {
        edges.extend(record.into_specs().map_err(MalformedGraph::from)?);
    }

    Ok(Dataset { stations, edges })
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    #[test]
    fn stations_and_edges() {
        let json = r#"{
            "stations": [
                {"name": "A", "lat": 0.0, "lon": 0.0},
                {"name": "B", "lat": 0.0, "lon": 0.01}
            ],
            "edges": [
                {"from": "A", "to": "B", "minutes": 2.0}
            ]
        }"#;
        let ds = read_json(json.as_bytes()).unwrap();
        assert_eq!(ds.stations.len(), 2);
        assert_eq!(ds.edges, vec![EdgeSpec::with_minutes("A", "B", 2.0).unwrap()]);
    }

    #[test]
    fn bidirectional_adds_reverse_edge() {
        let json = r#"{
            "stations": [
                {"name": "A", "lat": 0.0, "lon": 0.0},
                {"name": "B", "lat": 0.0, "lon": 0.01}
            ],
            "edges": [
                {"from": "A", "to": "B", "minutes": 2.0, "bidirectional": true}
            ]
        }"#;
        let ds = read_json(json.as_bytes()).unwrap();
        assert_eq!(ds.edges.len(), 2);
        assert_eq!(ds.edges[1].from, "B");
        assert_eq!(ds.edges[1].to, "A");
    }

    #[test]
    fn variations_by_name_and_number() {
        let json = r#"{
            "stations": [
                {"name": "A", "lat": 0.0, "lon": 0.0},
                {"name": "B", "lat": 0.0, "lon": 0.01}
            ],
            "edges": [{
                "from": "A", "to": "B", "minutes": 2.0,
                "variations": [
                    {"day": "Monday", "period": "morning_rush", "minutes": 3.0},
                    {"day": 7, "period": "late_night", "minutes": 4.0}
                ]
            }]
        }"#;
        let ds = read_json(json.as_bytes()).unwrap();
        let travel = &ds.edges[0].travel;
        assert_eq!(travel.observed(Weekday::Mon, TimePeriod::MorningRush), Some(3.0));
        assert_eq!(travel.observed(Weekday::Sun, TimePeriod::LateNight), Some(4.0));
        assert_eq!(travel.observed_len(), 2);
    }

    #[test]
    fn negative_minutes_are_malformed() {
        let json = r#"{
            "stations": [{"name": "A", "lat": 0.0, "lon": 0.0}],
            "edges": [{"from": "A", "to": "A", "minutes": -1.0}]
        }"#;
        let err = read_json(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Graph(MalformedGraph::InvalidValue(DomainError::InvalidTravelTime(_)))
        ));
    }

    #[test]
    fn unknown_period_is_malformed() {
        let json = r#"{
            "stations": [{"name": "A", "lat": 0.0, "lon": 0.0}],
            "edges": [{
                "from": "A", "to": "A", "minutes": 1.0,
                "variations": [{"day": 1, "period": "brunch", "minutes": 2.0}]
            }]
        }"#;
        let err = read_json(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Graph(MalformedGraph::InvalidValue(DomainError::UnknownPeriod(_)))
        ));
    }

    #[test]
    fn syntax_error_is_json_error() {
        let err = read_json("{\"stations\": [".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }
}
