//! Web layer for the transit router.
//!
//! JSON endpoints for route finding, algorithm comparison, health and
//! dataset reload.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
