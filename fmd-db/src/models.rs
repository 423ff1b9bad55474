//! Query result structs. All derive `Serialize` so the UI can hand them to
//! the page as JSON.

use fmd_core::layer::Year;
use serde::Serialize;

/// Summed areas (km²) over a district/year selection, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct FireTotals {
    pub burned_km2: f64,
    pub encroach_km2: f64,
    pub fire_bio_km2: f64,
    pub fire_risk_km2: f64,
    /// Number of (district, year) rows that went into the sums.
    pub records: u32,
}

/// One year's figures, summed over the selected district(s).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FireYearRow {
    pub year: Year,
    pub burned_km2: f64,
    pub encroach_km2: f64,
    pub fire_bio_km2: f64,
    pub fire_risk_km2: f64,
}
