//! Read views over the journal tables
//!
//! These mirror the record-keeping screens of the journal: pools and their
//! groupings, the hydrochemistry log with filtering and sorting, inventory
//! audits with boning detail, feeding, and movements. All read-only.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::QueryBuilder;
use std::collections::HashMap;

use aquafarm_common::db::models::{
    BoningRecord, FeedRecord, FeedType, HydrochemistryRecord, InventoryRecord, MovementRecord,
    Pool,
};

use crate::api::ApiError;
use crate::{db, AppState};

// ---------------------------------------------------------------------------
// Pools
// ---------------------------------------------------------------------------

/// Group pool with its member pools
#[derive(Debug, Serialize)]
pub struct GroupPoolView {
    pub id: i64,
    pub name: String,
    pub pools: Vec<Pool>,
}

#[derive(Debug, Serialize)]
pub struct PoolsResponse {
    pub pools: Vec<Pool>,
    pub group_pools: Vec<GroupPoolView>,
}

/// GET /api/pools
pub async fn list_pools(State(state): State<AppState>) -> Result<Json<PoolsResponse>, ApiError> {
    let pools = db::fetch_pools(&state.db).await?;

    let mut group_pools = Vec::new();
    for group in db::fetch_group_pools(&state.db).await? {
        let members = db::fetch_group_members(&state.db, group.id).await?;
        group_pools.push(GroupPoolView {
            id: group.id,
            name: group.name,
            pools: members,
        });
    }

    Ok(Json(PoolsResponse { pools, group_pools }))
}

#[derive(Debug, Serialize)]
pub struct LatestHydrochemistryResponse {
    pub pool_id: i64,
    pub pool_name: String,
    /// Sample date rendered as `YYYY-MM-DD HH:MM:SS` UTC
    pub sampled_at: Option<String>,
    /// None when no group pool containing this pool has been sampled yet
    pub record: Option<HydrochemistryRecord>,
}

/// GET /api/pools/:id/latest-hydrochemistry
///
/// Most recent water-chemistry sample among the group pools the pool
/// belongs to. 404 for an unknown pool; a pool with no samples is a valid
/// answer with a null record.
pub async fn get_latest_hydrochemistry(
    State(state): State<AppState>,
    Path(pool_id): Path<i64>,
) -> Result<Json<LatestHydrochemistryResponse>, ApiError> {
    let pool_name = db::fetch_pool_name(&state.db, pool_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Pool not found: {}", pool_id)))?;

    let record = db::fetch_latest_sample_for_pool(&state.db, pool_id).await?;
    let sampled_at = record
        .as_ref()
        .map(|r| aquafarm_common::time::format_ts(r.sample_date));

    Ok(Json(LatestHydrochemistryResponse {
        pool_id,
        pool_name,
        sampled_at,
        record,
    }))
}

// ---------------------------------------------------------------------------
// Hydrochemistry log
// ---------------------------------------------------------------------------

/// Query parameters for the hydrochemistry log
#[derive(Debug, Deserialize)]
pub struct HydrochemistryQuery {
    /// Range start (Unix seconds, inclusive)
    pub start: Option<i64>,
    /// Range end (Unix seconds, inclusive)
    pub end: Option<i64>,
    /// Sort column: `sample_date` (default) or one of the nine parameters
    pub sort_by: Option<String>,
    /// Sort descending when true
    #[serde(default)]
    pub reverse: bool,
}

/// GET /api/hydrochemistry
pub async fn list_hydrochemistry(
    State(state): State<AppState>,
    Query(query): Query<HydrochemistryQuery>,
) -> Result<Json<Vec<HydrochemistryRecord>>, ApiError> {
    let sort_column = validate_sort_column(query.sort_by.as_deref())?;

    let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(
        "SELECT id, group_pool_id, sample_date, doxy, temperature, ph,
                no2, no3, nh4, po4, salinity, illumination
         FROM hydrochemistry WHERE 1 = 1",
    );
    if let Some(start) = query.start {
        builder.push(" AND sample_date >= ").push_bind(start);
    }
    if let Some(end) = query.end {
        builder.push(" AND sample_date <= ").push_bind(end);
    }
    // sort_column is whitelisted above, safe to splice
    builder.push(format!(
        " ORDER BY {} {}, id",
        sort_column,
        if query.reverse { "DESC" } else { "ASC" }
    ));

    let records = builder
        .build_query_as::<HydrochemistryRecord>()
        .fetch_all(&state.db)
        .await?;

    Ok(Json(records))
}

/// Validate a requested sort column against the fixed column set
fn validate_sort_column(requested: Option<&str>) -> Result<&'static str, ApiError> {
    use crate::timeseries::Parameter;

    match requested {
        None | Some("sample_date") => Ok("sample_date"),
        Some(name) => name
            .parse::<Parameter>()
            .map(|p| p.as_str())
            .map_err(|_| ApiError::BadRequest(format!("Invalid sort column: {}", name))),
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Inventory audit with its boning detail rows
#[derive(Debug, Serialize)]
pub struct InventoryView {
    #[serde(flatten)]
    pub record: InventoryRecord,
    pub bonings: Vec<BoningRecord>,
}

/// GET /api/inventory
pub async fn list_inventory(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryView>>, ApiError> {
    let inventories = db::fetch_inventory_records(&state.db).await?;

    let mut bonings_by_inventory: HashMap<i64, Vec<BoningRecord>> = HashMap::new();
    for boning in db::fetch_boning_records(&state.db).await? {
        bonings_by_inventory
            .entry(boning.fish_inventory_id)
            .or_default()
            .push(boning);
    }

    let views = inventories
        .into_iter()
        .map(|record| {
            let bonings = bonings_by_inventory.remove(&record.id).unwrap_or_default();
            InventoryView { record, bonings }
        })
        .collect();

    Ok(Json(views))
}

// ---------------------------------------------------------------------------
// Feeding and movements
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FeedingResponse {
    pub feed_types: Vec<FeedType>,
    pub feeds: Vec<FeedRecord>,
}

/// GET /api/feeding
pub async fn list_feeding(
    State(state): State<AppState>,
) -> Result<Json<FeedingResponse>, ApiError> {
    let feed_types = db::fetch_feed_types(&state.db).await?;
    let feeds = db::fetch_feeds(&state.db).await?;
    Ok(Json(FeedingResponse { feed_types, feeds }))
}

/// GET /api/movements
pub async fn list_movements(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovementRecord>>, ApiError> {
    let movements = db::fetch_movements(&state.db).await?;
    Ok(Json(movements))
}
