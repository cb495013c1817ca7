//! aquafarm-report library - read-only journal review service
//!
//! Serves JSON views of the aquaculture journal: current fish stock
//! composition, hydrochemistry chart series, and the raw record lists.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod composition;
pub mod db;
pub mod timeseries;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/composition", get(api::get_fish_composition))
        .route("/api/chart/:parameter", get(api::get_chart_series))
        .route("/api/pools", get(api::list_pools))
        .route(
            "/api/pools/:id/latest-hydrochemistry",
            get(api::get_latest_hydrochemistry),
        )
        .route("/api/hydrochemistry", get(api::list_hydrochemistry))
        .route("/api/inventory", get(api::list_inventory))
        .route("/api/feeding", get(api::list_feeding))
        .route("/api/movements", get(api::list_movements))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
