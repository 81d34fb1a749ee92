//! The live network snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::dataset::{self, DatasetError};
use crate::routing::{Network, RoutingConfig, RoutingConfigError};

/// Errors from loading or reloading the network.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("invalid routing configuration: {0}")]
    Config(#[from] RoutingConfigError),

    #[error("load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Thread-safe holder of the current [`Network`].
///
/// Readers take an `Arc` to the snapshot and search it without holding the
/// lock, so a reload never blocks or alters a search already running.
#[derive(Clone)]
pub struct NetworkStore {
    inner: Arc<RwLock<Option<Arc<Network>>>>,
    source: PathBuf,
    config: RoutingConfig,
}

impl NetworkStore {
    /// Create a store with nothing loaded yet.
    pub fn empty(source: impl Into<PathBuf>, config: RoutingConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            source: source.into(),
            config,
        }
    }

    /// Create a store by loading `source` immediately.
    pub async fn load(
        source: impl Into<PathBuf>,
        config: RoutingConfig,
    ) -> Result<Self, StoreError> {
        let store = Self::empty(source, config);
        store.reload().await?;
        Ok(store)
    }

    /// A store holding an already-built network (for tests and embedding).
    pub fn from_network(network: Network, config: RoutingConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(Arc::new(network)))),
            source: PathBuf::new(),
            config,
        }
    }

    /// The current snapshot, if one has been loaded.
    pub async fn current(&self) -> Option<Arc<Network>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    pub async fn is_ready(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_some()
    }

    /// Re-read the source file and swap in the new network.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned. Returns the new station count.
    pub async fn reload(&self) -> Result<usize, StoreError> {
        let source = self.source.clone();
        let config = self.config.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<Network, StoreError> {
            let graph = dataset::load(&source)?;
            Ok(Network::new(graph, &config)?)
        })
        .await?;

        let network = match result {
            Ok(network) => network,
            Err(e) => {
                warn!(source = %self.source.display(), error = %e, "network load failed");
                return Err(e);
            }
        };

        let count = network.graph().len();
        let mut guard = self.inner.write().await;
        *guard = Some(Arc::new(network));
        info!(stations = count, "network snapshot replaced");
        Ok(count)
    }
}
