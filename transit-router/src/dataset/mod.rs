//! Loading a station network from disk.
//!
//! Two layouts are understood, chosen by file extension:
//!
//! - `.csv`: the observed travel-time export, one row per trip bucket
//! - `.json`: explicit stations and edges
//!
//! Both produce a [`Dataset`], which is then checked and turned into a
//! [`Graph`].

mod csv_format;
mod error;
mod json_format;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::domain::{EdgeSpec, Station};
use crate::graph::Graph;

pub use csv_format::read_csv;
pub use error::DatasetError;
pub use json_format::read_json;

/// Stations and edges as read, before graph validation.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub stations: Vec<Station>,
    pub edges: Vec<EdgeSpec>,
}

impl Dataset {
    pub fn into_graph(self) -> Result<Graph, DatasetError> {
        Ok(Graph::build(self.stations, self.edges)?)
    }
}

/// Read and validate the network at `path`.
///
/// Blocking; call from `spawn_blocking` inside async code.
pub fn load(path: &Path) -> Result<Graph, DatasetError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let open = || {
        File::open(path)
            .map(BufReader::new)
            .map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })
    };

    let dataset = match extension.as_deref() {
        Some("csv") => read_csv(open()?)?,
        Some("json") => read_json(open()?)?,
        _ => return Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
    };

    let graph = dataset.into_graph()?;
    info!(
        path = %path.display(),
        stations = graph.len(),
        edges = graph.edge_count(),
        "loaded network"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::graph::MalformedGraph;

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn load_csv_file() {
        let file = temp_file(
            ".csv",
            "month,time_of_day,day_of_week,start_station,start_lat,start_lon,end_station,end_lat,end_lon,travel_time\n\
             8,midday,Monday,A,0,0,B,0,0.01,2\n\
             8,midday,Monday,B,0,0.01,A,0,0,2\n",
        );
        let graph = load(file.path()).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn load_json_file() {
        let file = temp_file(
            ".JSON",
            r#"{"stations": [{"name": "A", "lat": 0, "lon": 0}], "edges": []}"#,
        );
        let graph = load(file.path()).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn unknown_extension_rejected() {
        let file = temp_file(".txt", "");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat(_)));
    }

    #[test]
    fn edge_to_missing_station_is_malformed() {
        let file = temp_file(
            ".json",
            r#"{"stations": [{"name": "A", "lat": 0, "lon": 0}],
                "edges": [{"from": "A", "to": "B", "minutes": 1}]}"#,
        );
        let err = load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Graph(MalformedGraph::UnknownEndpoint { .. })
        ));
    }

    #[test]
    fn duplicate_station_is_malformed() {
        let file = temp_file(
            ".json",
            r#"{"stations": [{"name": "A", "lat": 0, "lon": 0}, {"name": "A", "lat": 1, "lon": 1}]}"#,
        );
        let err = load(file.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate station: A"
        );
    }
}
