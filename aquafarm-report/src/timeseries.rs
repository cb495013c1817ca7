//! Time-series extraction for hydrochemistry charts
//!
//! Turns a flat set of dated samples into one chronologically-sorted series
//! per group pool, ready for a plotting client. The measured parameter is
//! chosen through the [`Parameter`] enum; unknown names are rejected at the
//! boundary instead of probing record fields dynamically.
//!
//! Pure functions over already-fetched rows; no I/O here.

use aquafarm_common::db::models::HydrochemistryRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// The fixed set of plottable hydrochemistry parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Doxy,
    Temperature,
    Ph,
    No2,
    No3,
    Nh4,
    Po4,
    Salinity,
    Illumination,
}

impl Parameter {
    /// All parameters, in schema column order
    pub const ALL: [Parameter; 9] = [
        Parameter::Doxy,
        Parameter::Temperature,
        Parameter::Ph,
        Parameter::No2,
        Parameter::No3,
        Parameter::Nh4,
        Parameter::Po4,
        Parameter::Salinity,
        Parameter::Illumination,
    ];

    /// Column name in the hydrochemistry table
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Doxy => "doxy",
            Parameter::Temperature => "temperature",
            Parameter::Ph => "ph",
            Parameter::No2 => "no2",
            Parameter::No3 => "no3",
            Parameter::Nh4 => "nh4",
            Parameter::Po4 => "po4",
            Parameter::Salinity => "salinity",
            Parameter::Illumination => "illumination",
        }
    }

    /// Human-readable chart label
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Doxy => "Dissolved oxygen (mg/L)",
            Parameter::Temperature => "Temperature (°C)",
            Parameter::Ph => "pH",
            Parameter::No2 => "Nitrite NO2 (mg/L)",
            Parameter::No3 => "Nitrate NO3 (mg/L)",
            Parameter::Nh4 => "Ammonium NH4 (mg/L)",
            Parameter::Po4 => "Phosphate PO4 (mg/L)",
            Parameter::Salinity => "Salinity (g/L)",
            Parameter::Illumination => "Illumination (lux)",
        }
    }

    /// Explicit field accessor for the selected parameter
    pub fn value_of(&self, record: &HydrochemistryRecord) -> Option<f64> {
        match self {
            Parameter::Doxy => record.doxy,
            Parameter::Temperature => record.temperature,
            Parameter::Ph => record.ph,
            Parameter::No2 => record.no2,
            Parameter::No3 => record.no3,
            Parameter::Nh4 => record.nh4,
            Parameter::Po4 => record.po4,
            Parameter::Salinity => record.salinity,
            Parameter::Illumination => record.illumination,
        }
    }
}

/// Unknown parameter name requested by a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownParameter(pub String);

impl std::fmt::Display for UnknownParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown hydrochemistry parameter: {}", self.0)
    }
}

impl std::error::Error for UnknownParameter {}

impl FromStr for Parameter {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownParameter(s.to_string()))
    }
}

/// One plotted point; `value` stays None for unmeasured samples so the
/// series is not silently shortened
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: i64,
    pub value: Option<f64>,
}

/// One chart trace, labeled with the group pool's display name
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

/// Extract one named series per group pool from the sample set
///
/// Samples are filtered to the inclusive `[start, end]` range, grouped by
/// group pool, and sorted ascending by sample date within each group (stable,
/// so equal dates keep input order). A `start > end` range is a valid query
/// with no matches, not an error.
pub fn extract_series(
    samples: &[HydrochemistryRecord],
    group_names: &HashMap<i64, String>,
    parameter: Parameter,
    start: i64,
    end: i64,
) -> Vec<NamedSeries> {
    let mut groups: BTreeMap<i64, Vec<&HydrochemistryRecord>> = BTreeMap::new();

    for sample in samples {
        if sample.sample_date >= start && sample.sample_date <= end {
            groups.entry(sample.group_pool_id).or_default().push(sample);
        }
    }

    groups
        .into_iter()
        .map(|(group_id, mut records)| {
            records.sort_by_key(|r| r.sample_date);
            let points = records
                .iter()
                .map(|r| SeriesPoint {
                    timestamp: r.sample_date,
                    value: parameter.value_of(r),
                })
                .collect();
            let name = group_names
                .get(&group_id)
                .cloned()
                .unwrap_or_else(|| format!("#{}", group_id));
            NamedSeries { name, points }
        })
        .collect()
}
