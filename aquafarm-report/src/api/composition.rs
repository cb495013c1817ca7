//! Fish stock composition endpoint
//!
//! Answers "what does each pool currently hold" by reducing the audit
//! history to the latest inventory per (pool, fish type) and summing the
//! attached boning rows per fish type.

use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::api::ApiError;
use crate::composition::{latest_per_partition, summarize, FishTypeSummary};
use crate::{db, AppState};

/// Composition response: fish type name → stock summary
///
/// Summaries are rebuilt on every request; `generated_at` records when
/// (Unix seconds).
#[derive(Debug, Serialize)]
pub struct CompositionResponse {
    pub generated_at: i64,
    pub fish_types: BTreeMap<String, FishTypeSummary>,
}

/// GET /api/composition
///
/// Fish types with no inventory records are absent from the map rather than
/// reported as zero.
pub async fn get_fish_composition(
    State(state): State<AppState>,
) -> Result<Json<CompositionResponse>, ApiError> {
    let inventories = db::fetch_inventory_records(&state.db).await?;
    let latest = latest_per_partition(&inventories);

    let mut bonings_by_inventory = HashMap::new();
    for record in &latest {
        let bonings = db::fetch_bonings_for(&state.db, record.id).await?;
        bonings_by_inventory.insert(record.id, bonings);
    }

    let pool_names = db::fetch_pool_names(&state.db).await?;
    let fish_type_names = db::fetch_fish_type_names(&state.db).await?;

    let fish_types = summarize(&latest, &bonings_by_inventory, &pool_names, &fish_type_names);

    Ok(Json(CompositionResponse {
        generated_at: aquafarm_common::time::now_ts(),
        fish_types,
    }))
}
