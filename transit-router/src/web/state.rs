//! Application state for the web layer.

use crate::store::NetworkStore;

/// Shared application state.
///
/// Cloned per request; the store itself is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Current network snapshot and its reload source
    pub store: NetworkStore,
}

impl AppState {
    pub fn new(store: NetworkStore) -> Self {
        Self { store }
    }
}
