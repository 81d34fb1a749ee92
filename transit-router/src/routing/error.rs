//! Query-time routing errors.

use crate::domain::DomainError;

/// Error from resolving or running a route query.
///
/// Searches are deterministic, so none of these are worth retrying with
/// the same inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// Station is not in the graph
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Goal is not reachable from the start
    #[error("no route from {from} to {to}")]
    NoRoute { from: String, to: String },

    /// Time or day fields could not be understood
    #[error(transparent)]
    InvalidTime(#[from] DomainError),

    /// Search hit its node-expansion cap
    #[error("search from {from} to {to} exceeded {limit} expansions")]
    ResourceExceeded {
        from: String,
        to: String,
        limit: usize,
    },

    /// Search hit its wall-clock budget
    #[error("search from {from} to {to} timed out after {elapsed_ms} ms")]
    Timeout {
        from: String,
        to: String,
        elapsed_ms: u64,
    },
}
