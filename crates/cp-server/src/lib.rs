//! Connections Plus HTTP API server (Axum).
//!
//! Serves share-link encoding and resolution, stored puzzles, and
//! server-side game sessions.

pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use axum::Router;
use state::AppState;

/// Build the application router with all routes.
pub fn app() -> Router {
    let state = AppState::new();
    app_with_state(state)
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::link_routes())
        .merge(routes::puzzle_routes())
        .merge(routes::game_routes())
        .with_state(state)
}
