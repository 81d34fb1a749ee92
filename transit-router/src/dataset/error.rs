//! Dataset loading errors.

use std::path::PathBuf;

use crate::graph::MalformedGraph;

/// Errors from reading a station/edge dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV row parsed but holds an unusable value
    #[error("line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    /// File extension is neither `.csv` nor `.json`
    #[error("unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Rows are fine individually but do not form a graph
    #[error(transparent)]
    Graph(#[from] MalformedGraph),
}
