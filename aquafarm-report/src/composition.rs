//! Latest-inventory aggregation
//!
//! The journal keeps every historical inventory audit; only the most recent
//! audit per (pool, fish type) pair describes what a pool currently holds.
//! This module selects those latest records and folds their boning rows into
//! per-fish-type stock totals.
//!
//! Pure functions over already-fetched rows; no I/O here.

use aquafarm_common::db::models::{BoningRecord, InventoryRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Current stock totals for one fish type across all pools
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FishTypeSummary {
    /// Sum of boning counts over latest-selected records
    pub total_count: i64,
    /// Sum of boning biomass over latest-selected records
    pub total_mass: f64,
    /// Display names of pools holding this fish type (deduped by name)
    pub pools: BTreeSet<String>,
}

/// Select the latest inventory record within each (pool, fish type) partition
///
/// Latest means maximum `control_date`; an exact date tie is resolved to the
/// record with the highest id, so repeated runs over the same rows always
/// pick the same record. Output is ordered by (pool_id, fish_type_id).
pub fn latest_per_partition(records: &[InventoryRecord]) -> Vec<&InventoryRecord> {
    let mut latest: HashMap<(i64, i64), &InventoryRecord> = HashMap::new();

    for record in records {
        let key = (record.pool_id, record.fish_type_id);
        match latest.get(&key) {
            Some(current)
                if (current.control_date, current.id) >= (record.control_date, record.id) => {}
            _ => {
                latest.insert(key, record);
            }
        }
    }

    let mut selected: Vec<&InventoryRecord> = latest.into_values().collect();
    selected.sort_by_key(|r| (r.pool_id, r.fish_type_id));
    selected
}

/// Fold latest-selected records and their boning rows into per-fish-type totals
///
/// A latest record with no boning rows still registers its pool as holding
/// the fish type, contributing (0, 0.0) to the totals. Fish types with no
/// latest record are absent from the result, not zero-valued.
pub fn summarize(
    latest: &[&InventoryRecord],
    bonings_by_inventory: &HashMap<i64, Vec<BoningRecord>>,
    pool_names: &HashMap<i64, String>,
    fish_type_names: &HashMap<i64, String>,
) -> BTreeMap<String, FishTypeSummary> {
    let mut summaries: BTreeMap<String, FishTypeSummary> = BTreeMap::new();

    for record in latest {
        let fish_type_name = display_name(fish_type_names, record.fish_type_id);
        let pool_name = display_name(pool_names, record.pool_id);

        let (count, mass) = match bonings_by_inventory.get(&record.id) {
            Some(bonings) => bonings
                .iter()
                .fold((0i64, 0f64), |(c, m), b| (c + b.fish_number, m + b.fish_biomass)),
            None => (0, 0.0),
        };

        let summary = summaries.entry(fish_type_name).or_default();
        summary.total_count += count;
        summary.total_mass += mass;
        summary.pools.insert(pool_name);
    }

    summaries
}

/// Resolve a display name, falling back to the raw id for dangling references
fn display_name(names: &HashMap<i64, String>, id: i64) -> String {
    names.get(&id).cloned().unwrap_or_else(|| format!("#{}", id))
}
