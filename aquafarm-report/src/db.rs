//! Database access layer for the report service
//!
//! The service never writes: it opens the journal database in read-only
//! mode and exposes the fetch operations the aggregation handlers consume.
//! Fetch failures propagate unchanged; there are no retries here.

use anyhow::{Context, Result};
use aquafarm_common::db::models::{
    BoningRecord, FeedRecord, FeedType, FishType, GroupPool, HydrochemistryRecord,
    InventoryRecord, MovementRecord, Pool,
};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::Path;

/// Connect to the journal database with read-only mode
///
/// Safety: uses SQLite mode=ro so no handler can mutate the journal.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        anyhow::bail!(
            "Database not found: {}\nRun the service once with a writable root folder to initialize it.",
            db_path.display()
        );
    }

    let db_url = format!("sqlite://{}?mode=ro", db_path.display());

    let pool = SqlitePool::connect(&db_url)
        .await
        .context("Failed to connect to database in read-only mode")?;

    // Debug builds confirm the journal really is write-protected: a DDL
    // statement must be refused before any handler sees the pool.
    #[cfg(debug_assertions)]
    {
        let probe = sqlx::query("CREATE TABLE _readonly_probe (id INTEGER)")
            .execute(&pool)
            .await;
        assert!(
            probe.is_err(),
            "journal opened writable despite mode=ro: {}",
            db_path.display()
        );
    }

    Ok(pool)
}

/// All inventory audit records, oldest id first
pub async fn fetch_inventory_records(db: &SqlitePool) -> sqlx::Result<Vec<InventoryRecord>> {
    sqlx::query_as(
        "SELECT id, control_date, pool_id, fish_type_id, control_desc
         FROM fish_inventory ORDER BY id",
    )
    .fetch_all(db)
    .await
}

/// Boning rows attached to one inventory record
pub async fn fetch_bonings_for(
    db: &SqlitePool,
    inventory_id: i64,
) -> sqlx::Result<Vec<BoningRecord>> {
    sqlx::query_as(
        "SELECT id, fish_inventory_id, fish_number, fish_biomass, fish_comment
         FROM fish_boning WHERE fish_inventory_id = ? ORDER BY id",
    )
    .bind(inventory_id)
    .fetch_all(db)
    .await
}

/// All boning rows, oldest id first
pub async fn fetch_boning_records(db: &SqlitePool) -> sqlx::Result<Vec<BoningRecord>> {
    sqlx::query_as(
        "SELECT id, fish_inventory_id, fish_number, fish_biomass, fish_comment
         FROM fish_boning ORDER BY id",
    )
    .fetch_all(db)
    .await
}

/// Hydrochemistry samples within the inclusive `[start, end]` date range
pub async fn fetch_samples(
    db: &SqlitePool,
    start: i64,
    end: i64,
) -> sqlx::Result<Vec<HydrochemistryRecord>> {
    sqlx::query_as(
        "SELECT id, group_pool_id, sample_date, doxy, temperature, ph,
                no2, no3, nh4, po4, salinity, illumination
         FROM hydrochemistry
         WHERE sample_date >= ? AND sample_date <= ?
         ORDER BY id",
    )
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
}

pub async fn fetch_pools(db: &SqlitePool) -> sqlx::Result<Vec<Pool>> {
    sqlx::query_as("SELECT id, name FROM pools ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn fetch_group_pools(db: &SqlitePool) -> sqlx::Result<Vec<GroupPool>> {
    sqlx::query_as("SELECT id, name FROM group_pools ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn fetch_fish_types(db: &SqlitePool) -> sqlx::Result<Vec<FishType>> {
    sqlx::query_as("SELECT id, name FROM fish_types ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn fetch_feed_types(db: &SqlitePool) -> sqlx::Result<Vec<FeedType>> {
    sqlx::query_as("SELECT id, name, unit FROM feed_types ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn fetch_feeds(db: &SqlitePool) -> sqlx::Result<Vec<FeedRecord>> {
    sqlx::query_as(
        "SELECT id, pool_id, feed_date, feed_type_id, feed_value, feed_desc
         FROM feeds ORDER BY feed_date, id",
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_movements(db: &SqlitePool) -> sqlx::Result<Vec<MovementRecord>> {
    sqlx::query_as(
        "SELECT id, pool_id_from, pool_id_to, fish_type_id, movement_date,
                fish_biomass, movement_reason, movement_desc
         FROM fish_movements ORDER BY movement_date, id",
    )
    .fetch_all(db)
    .await
}

/// Pool id → display name lookup
pub async fn fetch_pool_names(db: &SqlitePool) -> sqlx::Result<HashMap<i64, String>> {
    Ok(fetch_pools(db).await?.into_iter().map(|p| (p.id, p.name)).collect())
}

/// Group pool id → display name lookup
pub async fn fetch_group_names(db: &SqlitePool) -> sqlx::Result<HashMap<i64, String>> {
    Ok(fetch_group_pools(db)
        .await?
        .into_iter()
        .map(|g| (g.id, g.name))
        .collect())
}

/// Fish type id → display name lookup
pub async fn fetch_fish_type_names(db: &SqlitePool) -> sqlx::Result<HashMap<i64, String>> {
    Ok(fetch_fish_types(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect())
}

/// Pool name by id, None when the pool does not exist
pub async fn fetch_pool_name(db: &SqlitePool, pool_id: i64) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar("SELECT name FROM pools WHERE id = ?")
        .bind(pool_id)
        .fetch_optional(db)
        .await
}

/// Member pool ids for one group pool
pub async fn fetch_group_members(
    db: &SqlitePool,
    group_pool_id: i64,
) -> sqlx::Result<Vec<Pool>> {
    sqlx::query_as(
        "SELECT p.id, p.name FROM pools p
         JOIN group_pool_pools gpp ON gpp.pool_id = p.id
         WHERE gpp.group_pool_id = ?
         ORDER BY p.id",
    )
    .bind(group_pool_id)
    .fetch_all(db)
    .await
}

/// Most recent hydrochemistry sample among group pools containing the pool
///
/// Ties on sample date resolve to the highest record id.
pub async fn fetch_latest_sample_for_pool(
    db: &SqlitePool,
    pool_id: i64,
) -> sqlx::Result<Option<HydrochemistryRecord>> {
    sqlx::query_as(
        "SELECT h.id, h.group_pool_id, h.sample_date, h.doxy, h.temperature, h.ph,
                h.no2, h.no3, h.nh4, h.po4, h.salinity, h.illumination
         FROM hydrochemistry h
         JOIN group_pool_pools gpp ON gpp.group_pool_id = h.group_pool_id
         WHERE gpp.pool_id = ?
         ORDER BY h.sample_date DESC, h.id DESC
         LIMIT 1",
    )
    .bind(pool_id)
    .fetch_optional(db)
    .await
}
