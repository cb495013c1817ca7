//! Hydrochemistry chart endpoint
//!
//! Emits one chronologically-sorted series per group pool for a requested
//! parameter and date range. Drawing the chart is the client's job; the
//! series keep null values so plotted gaps stay visible.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::timeseries::{extract_series, NamedSeries, Parameter};
use crate::{db, AppState};

/// Query parameters for chart series
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Range start (Unix seconds, inclusive)
    pub start: i64,
    /// Range end (Unix seconds, inclusive)
    pub end: i64,
}

/// Chart response with title metadata and one trace per group pool
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub parameter: String,
    pub label: String,
    pub start: i64,
    pub end: i64,
    pub series: Vec<NamedSeries>,
}

/// GET /api/chart/:parameter?start=..&end=..
///
/// Unknown parameter names are rejected with 400 before any data is
/// fetched. An inverted range (start > end) is a valid query with nothing
/// to plot and returns an empty series list.
pub async fn get_chart_series(
    State(state): State<AppState>,
    Path(parameter): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    let parameter: Parameter = parameter
        .parse()
        .map_err(|e: crate::timeseries::UnknownParameter| ApiError::BadRequest(e.to_string()))?;

    let samples = db::fetch_samples(&state.db, query.start, query.end).await?;
    let group_names = db::fetch_group_names(&state.db).await?;

    let series = extract_series(&samples, &group_names, parameter, query.start, query.end);

    Ok(Json(ChartResponse {
        parameter: parameter.as_str().to_string(),
        label: parameter.label().to_string(),
        start: query.start,
        end: query.end,
        series,
    }))
}
