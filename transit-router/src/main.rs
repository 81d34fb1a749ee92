use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_router::config::ServerConfig;
use transit_router::store::NetworkStore;
use transit_router::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,transit_router=debug")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            process::exit(1);
        }
    };

    // Malformed data is fatal.
    info!(path = %config.data_path.display(), "loading network");
    let store = match NetworkStore::load(&config.data_path, config.routing.clone()).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "failed to load network");
            process::exit(1);
        }
    };

    if let Some(every) = config.reload_interval {
        let store = store.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match store.reload().await {
                    Ok(count) => info!(stations = count, "reloaded network"),
                    Err(e) => error!(error = %e, "periodic reload failed, keeping previous network"),
                }
            }
        });
    }

    let app = create_router(AppState::new(store));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            process::exit(1);
        }
    };

    info!(addr = %config.bind_addr, "transit router listening");
    info!("  GET  /health                  - Health check");
    info!("  POST /api/find-route          - Fastest route (Dijkstra)");
    info!("  POST /api/compare-algorithms  - Dijkstra vs A*");
    info!("  POST /api/reload              - Reload the dataset");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        process::exit(1);
    }
}
