//! Database row models
//!
//! All `*_date` columns are integer seconds since the Unix epoch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pool {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GroupPool {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FishType {
    pub id: i64,
    pub name: String,
}

/// One water-chemistry sample for a group pool
///
/// The nine measured parameters are all optional; a missing value means the
/// parameter was not measured on that visit.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HydrochemistryRecord {
    pub id: i64,
    pub group_pool_id: i64,
    pub sample_date: i64,
    pub doxy: Option<f64>,
    pub temperature: Option<f64>,
    pub ph: Option<f64>,
    pub no2: Option<f64>,
    pub no3: Option<f64>,
    pub nh4: Option<f64>,
    pub po4: Option<f64>,
    pub salinity: Option<f64>,
    pub illumination: Option<f64>,
}

/// A dated count/biomass audit event for a (pool, fish type) pair
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryRecord {
    pub id: i64,
    pub control_date: i64,
    pub pool_id: i64,
    pub fish_type_id: i64,
    pub control_desc: Option<String>,
}

/// A detailed sub-measurement attached to one inventory record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoningRecord {
    pub id: i64,
    pub fish_inventory_id: i64,
    pub fish_number: i64,
    pub fish_biomass: f64,
    pub fish_comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedType {
    pub id: i64,
    pub name: String,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedRecord {
    pub id: i64,
    pub pool_id: i64,
    pub feed_date: i64,
    pub feed_type_id: i64,
    pub feed_value: f64,
    pub feed_desc: Option<String>,
}

/// One transfer of fish between pools
///
/// Either end may be NULL: stocking from outside has no source pool and
/// culling/harvest has no destination pool.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovementRecord {
    pub id: i64,
    pub pool_id_from: Option<i64>,
    pub pool_id_to: Option<i64>,
    pub fish_type_id: i64,
    pub movement_date: i64,
    pub fish_biomass: f64,
    pub movement_reason: Option<String>,
    pub movement_desc: Option<String>,
}
