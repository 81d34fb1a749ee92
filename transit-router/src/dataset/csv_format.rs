//! Travel-time CSV, one row per observed trip bucket.
//!
//! Each row gives a start and end station with coordinates, the day of
//! week and time-of-day period it was observed in, and the average travel
//! time. Many rows describe the same ordered pair; they collapse into one
//! edge whose base time is the mean over all its rows and whose observed
//! times are the per-bucket means.

use std::collections::HashMap;
use std::io::Read;

use chrono::Weekday;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Coordinates, EdgeSpec, Station, TimePeriod, TravelTimes, parse_weekday};

use super::{Dataset, DatasetError};

#[derive(Debug, Deserialize)]
struct TravelTimeRow {
    time_of_day: String,
    day_of_week: String,
    #[serde(alias = "start_loc", alias = "start_name")]
    start_station: String,
    start_lat: f64,
    #[serde(alias = "start_long")]
    start_lon: f64,
    #[serde(alias = "end_loc", alias = "end_name")]
    end_station: String,
    end_lat: f64,
    #[serde(alias = "end_long")]
    end_lon: f64,
    #[serde(alias = "avg_time", alias = "travel_time_minutes")]
    travel_time: f64,
}

/// Running means for one ordered station pair.
#[derive(Default)]
struct PairTimes {
    sum: f64,
    count: u32,
    buckets: HashMap<(Weekday, TimePeriod), (f64, u32)>,
}

impl PairTimes {
    fn into_travel_times(self) -> Result<TravelTimes, crate::domain::DomainError> {
        let mut travel = TravelTimes::new(self.sum / f64::from(self.count))?;
        for ((day, period), (sum, count)) in self.buckets {
            travel = travel.with_observed(day, period, sum / f64::from(count))?;
        }
        Ok(travel)
    }
}

/// Accumulates stations and pairs in first-seen order.
#[derive(Default)]
struct Builder {
    stations: Vec<Station>,
    station_index: HashMap<String, usize>,
    pairs: Vec<(String, String)>,
    pair_times: HashMap<(String, String), PairTimes>,
    skipped_buckets: usize,
}

impl Builder {
    fn station(&mut self, line: u64, name: &str, lat: f64, lon: f64) -> Result<String, DatasetError> {
        let invalid = |e: crate::domain::DomainError| DatasetError::InvalidRow {
            line,
            message: e.to_string(),
        };
        let coordinates = Coordinates::new(lat, lon).map_err(invalid)?;
        let station = Station::new(name, coordinates).map_err(invalid)?;
        let name = station.name().to_string();

        match self.station_index.get(&name) {
            Some(&idx) => {
                if self.stations[idx].coordinates() != coordinates {
                    warn!(
                        line,
                        station = %name,
                        "conflicting coordinates, keeping first"
                    );
                }
            }
            None => {
                self.station_index.insert(name.clone(), self.stations.len());
                self.stations.push(station);
            }
        }
        Ok(name)
    }

    fn row(&mut self, line: u64, row: TravelTimeRow) -> Result<(), DatasetError> {
        if !row.travel_time.is_finite() || row.travel_time <= 0.0 {
            return Err(DatasetError::InvalidRow {
                line,
                message: format!("travel time {} must be positive", row.travel_time),
            });
        }

        let from = self.station(line, &row.start_station, row.start_lat, row.start_lon)?;
        let to = self.station(line, &row.end_station, row.end_lat, row.end_lon)?;

        let key = (from, to);
        if !self.pair_times.contains_key(&key) {
            self.pairs.push(key.clone());
        }
        let times = self.pair_times.entry(key).or_default();
        times.sum += row.travel_time;
        times.count += 1;

        match (parse_weekday(&row.day_of_week), row.time_of_day.parse::<TimePeriod>()) {
            (Ok(day), Ok(period)) => {
                let bucket = times.buckets.entry((day, period)).or_insert((0.0, 0));
                bucket.0 += row.travel_time;
                bucket.1 += 1;
            }
            (day, period) => {
                self.skipped_buckets += 1;
                debug!(
                    line,
                    day_ok = day.is_ok(),
                    period_ok = period.is_ok(),
                    "row has no usable day/period bucket"
                );
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Dataset, DatasetError> {
        if self.skipped_buckets > 0 {
            warn!(
                rows = self.skipped_buckets,
                "rows with unrecognised day or period count towards base times only"
            );
        }
        let mut pair_times = self.pair_times;
        let mut edges = Vec::with_capacity(self.pairs.len());
        for (from, to) in self.pairs {
            let Some(times) = pair_times.remove(&(from.clone(), to.clone())) else {
                continue;
            };
            let travel = times
                .into_travel_times()
                .map_err(crate::graph::MalformedGraph::from)?;
            edges.push(EdgeSpec::new(from, to, travel));
        }
        Ok(Dataset {
            stations: self.stations,
            edges,
        })
    }
}

/// Read the travel-time CSV layout.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut builder = Builder::default();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let row: TravelTimeRow = record.deserialize(Some(&headers))?;
        builder.row(line, row)?;
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "month,time_of_day,day_of_week,start_station,start_lat,start_lon,end_station,end_lat,end_lon,travel_time\n";

    fn read(body: &str) -> Result<Dataset, DatasetError> {
        read_csv(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn single_row() {
        let ds = read("August,late_night,Saturday,Greenpoint Av,40.731352,-73.954449,Nassau Av,40.724635,-73.951277,1.37\n").unwrap();
        assert_eq!(ds.stations.len(), 2);
        assert_eq!(ds.stations[0].name(), "Greenpoint Av");
        assert_eq!(ds.stations[1].name(), "Nassau Av");
        assert_eq!(ds.edges.len(), 1);
        let edge = &ds.edges[0];
        assert_eq!(edge.from, "Greenpoint Av");
        assert_eq!(edge.to, "Nassau Av");
        assert_eq!(edge.travel.base_minutes(), 1.37);
        assert_eq!(
            edge.travel.observed(Weekday::Sat, TimePeriod::LateNight),
            Some(1.37)
        );
    }

    #[test]
    fn rows_for_same_pair_are_averaged() {
        let ds = read(concat!(
            "1,morning_rush,Monday,A,0,0,B,0,0.01,4\n",
            "1,morning_rush,Monday,A,0,0,B,0,0.01,6\n",
            "1,midday,Monday,A,0,0,B,0,0.01,2\n",
            "1,midday,Tuesday,B,0,0.01,A,0,0,3\n",
        ))
        .unwrap();
        assert_eq!(ds.stations.len(), 2);
        assert_eq!(ds.edges.len(), 2);

        let ab = &ds.edges[0];
        assert_eq!((ab.from.as_str(), ab.to.as_str()), ("A", "B"));
        assert_eq!(ab.travel.base_minutes(), 4.0);
        assert_eq!(ab.travel.observed(Weekday::Mon, TimePeriod::MorningRush), Some(5.0));
        assert_eq!(ab.travel.observed(Weekday::Mon, TimePeriod::Midday), Some(2.0));
        assert_eq!(ab.travel.observed_len(), 2);

        let ba = &ds.edges[1];
        assert_eq!((ba.from.as_str(), ba.to.as_str()), ("B", "A"));
        assert_eq!(ba.travel.base_minutes(), 3.0);
    }

    #[test]
    fn subway_export_header() {
        let body = "month,time_of_day,day_of_week,start_loc,start_lat,start_long,end_loc,end_lat,end_long,avg_time\n\
                    August,evening_rush,6,Greenpoint Av,40.731352,-73.954449,Nassau Av,40.724635,-73.951277,2.5\n";
        let ds = read_csv(body.as_bytes()).unwrap();
        assert_eq!(ds.stations.len(), 2);
        assert_eq!(ds.stations[0].name(), "Greenpoint Av");
        assert_eq!(ds.stations[0].coordinates().lon(), -73.954449);
        assert_eq!(ds.stations[1].coordinates().lon(), -73.951277);
        assert_eq!(ds.edges.len(), 1);
        assert_eq!(ds.edges[0].travel.base_minutes(), 2.5);
        assert_eq!(
            ds.edges[0].travel.observed(Weekday::Sat, TimePeriod::EveningRush),
            Some(2.5)
        );
    }

    #[test]
    fn header_aliases_and_extra_columns() {
        let body = "date,month,time_of_day,day_of_week,start_name,start_lat,start_lon,end_name,end_lat,end_lon,travel_time_minutes\n\
                    2024-08-03,8,evening_rush,Sat,A,0,0,B,0,0.01,2.5\n";
        let ds = read_csv(body.as_bytes()).unwrap();
        assert_eq!(ds.edges.len(), 1);
        assert_eq!(ds.edges[0].from, "A");
        assert_eq!(ds.edges[0].travel.base_minutes(), 2.5);
    }

    #[test]
    fn unknown_bucket_counts_towards_base_only() {
        let ds = read(concat!(
            "1,early_morning,Saturday,A,0,0,B,0,0.01,2\n",
            "1,midday,Saturday,A,0,0,B,0,0.01,4\n",
        ))
        .unwrap();
        let t = &ds.edges[0].travel;
        assert_eq!(t.base_minutes(), 3.0);
        assert_eq!(t.observed_len(), 1);
    }

    #[test]
    fn conflicting_coordinates_keep_first() {
        let ds = read(concat!(
            "1,midday,Monday,A,0,0,B,0,0.01,2\n",
            "1,midday,Monday,A,0.5,0.5,C,0,0.02,2\n",
        ))
        .unwrap();
        assert_eq!(ds.stations.len(), 3);
        assert_eq!(ds.stations[0].coordinates().lat(), 0.0);
    }

    #[test]
    fn non_positive_time_is_rejected_with_line() {
        let err = read(concat!(
            "1,midday,Monday,A,0,0,B,0,0.01,2\n",
            "1,midday,Monday,B,0,0.01,A,0,0,0\n",
        ))
        .unwrap_err();
        match err {
            DatasetError::InvalidRow { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("must be positive"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_coordinates_rejected() {
        let err = read("1,midday,Monday,A,95,0,B,0,0.01,2\n").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn unparseable_number_is_csv_error() {
        let err = read("1,midday,Monday,A,zero,0,B,0,0.01,2\n").unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    #[test]
    fn empty_file_gives_empty_dataset() {
        let ds = read("").unwrap();
        assert!(ds.stations.is_empty());
        assert!(ds.edges.is_empty());
    }
}
