//! Graph construction errors.

use crate::domain::DomainError;

/// The station/edge data cannot form a valid graph.
///
/// Raised only while building; a graph that exists is well formed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedGraph {
    /// Two stations share a name
    #[error("duplicate station: {0}")]
    DuplicateStation(String),

    /// An edge endpoint is not a known station
    #[error("edge {from} -> {to} references unknown station {missing}")]
    UnknownEndpoint {
        from: String,
        to: String,
        missing: String,
    },

    /// More than one edge for the same ordered pair
    #[error("duplicate edge {from} -> {to}")]
    DuplicateEdge { from: String, to: String },

    /// A station or edge value failed validation
    #[error("invalid value: {0}")]
    InvalidValue(#[from] DomainError),
}
