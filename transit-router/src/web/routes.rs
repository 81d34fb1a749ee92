//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::routing::{Network, RouteError};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/find-route", post(find_route))
        .route("/api/compare-algorithms", post(compare_algorithms))
        .route("/api/reload", post(reload))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
///
/// Succeeds only once a network has been loaded.
async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let network = snapshot(&state).await?;
    Ok(Json(HealthResponse {
        status: "ok",
        stations: network.graph().len(),
        edges: network.graph().edge_count(),
    }))
}

/// Shortest route by Dijkstra.
async fn find_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RouteResponse>, AppError> {
    let req = parse_request(&body)?;
    let network = snapshot(&state).await?;

    let response = tokio::task::spawn_blocking(move || {
        let query = build_query(&network, &req)?;
        let result = network.find_route(&query)?;
        Ok::<_, RouteError>(RouteResponse::from_result(&network, &result))
    })
    .await??;

    Ok(Json(response))
}

/// Run Dijkstra and A* on the same query and compare them.
async fn compare_algorithms(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ComparisonResponse>, AppError> {
    let req = parse_request(&body)?;
    let network = snapshot(&state).await?;

    let response = tokio::task::spawn_blocking(move || {
        let query = build_query(&network, &req)?;
        let comparison = network.compare(&query)?;
        info!(
            start = %req.start_station,
            end = %req.end_station,
            winner = ?comparison.winner,
            dijkstra_explored = comparison.dijkstra.stations_explored(),
            astar_explored = comparison.astar.stations_explored(),
            "compared algorithms"
        );
        Ok::<_, RouteError>(ComparisonResponse::from_comparison(&network, &comparison))
    })
    .await??;

    Ok(Json(response))
}

/// Re-read the dataset and swap in the new network.
async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let stations = state.store.reload().await?;
    Ok(Json(ReloadResponse {
        status: "ok",
        stations,
    }))
}

/// Parse JSON manually so the body can be logged on failure.
fn parse_request(body: &[u8]) -> Result<RouteRequest, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid request body");
        AppError::InvalidRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

async fn snapshot(state: &AppState) -> Result<Arc<Network>, AppError> {
    state.store.current().await.ok_or(AppError::NotReady)
}

fn build_query(
    network: &Network,
    req: &RouteRequest,
) -> Result<crate::routing::RouteQuery, RouteError> {
    let day = req.day.as_ref().map(DayField::to_text);
    network.query(
        &req.start_station,
        &req.end_station,
        req.time.as_deref(),
        day.as_deref(),
        Local::now().naive_local(),
    )
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    InvalidRequest { message: String },
    Route(RouteError),
    NotReady,
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::Route(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("search task failed: {e}"),
        }
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::Route(e) => match e {
                RouteError::InvalidTime(_) => (StatusCode::BAD_REQUEST, "invalid_time"),
                RouteError::UnknownStation(_) => (StatusCode::BAD_REQUEST, "unknown_station"),
                RouteError::NoRoute { .. } => (StatusCode::NOT_FOUND, "no_route"),
                RouteError::ResourceExceeded { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "resource_exceeded")
                }
                RouteError::Timeout { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "timeout"),
            },
            AppError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, "not_ready"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::InvalidRequest { message } | AppError::Internal { message } => {
                message.clone()
            }
            AppError::Route(e) => e.to_string(),
            AppError::NotReady => "network has not finished loading".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.message();

        if status.is_server_error() {
            error!(%status, code, %message, "request failed");
        } else {
            warn!(%status, code, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: code,
            message,
        });
        (status, body).into_response()
    }
}
