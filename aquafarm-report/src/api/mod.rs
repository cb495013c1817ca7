//! HTTP API handlers for the report service

pub mod chart;
pub mod composition;
pub mod error;
pub mod health;
pub mod journal;

pub use chart::get_chart_series;
pub use composition::get_fish_composition;
pub use error::ApiError;
pub use health::health_routes;
pub use journal::{
    get_latest_hydrochemistry, list_feeding, list_hydrochemistry, list_inventory,
    list_movements, list_pools,
};
