//! District fire and encroachment statistics loaded from CSV.

use crate::layer::Year;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded district fire/encroachment statistics.
pub static FIRE_RECORDS_CSV: &str = include_str!("../../fixtures/fire_records.csv");

/// Per-district, per-year burned area and encroachment figures (km²).
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FireRecord {
    pub district: String,
    pub year: Year,
    /// Burned forest area
    pub burned_km2: f64,
    /// Encroached forest area
    pub encroach_km2: f64,
    /// Burned area inside biodiversity zones
    pub fire_bio_km2: f64,
    /// Area classified as high fire risk
    pub fire_risk_km2: f64,
}

fn parse_area(ess: &str) -> Option<f64> {
    let trimmed = ess.trim();
    match trimmed.to_lowercase().as_str() {
        "" | "null" | "n/a" | "na" => Some(0.0),
        _ => trimmed.parse::<f64>().ok(),
    }
}

impl FireRecord {
    /// Parse a CSV string of fire records.
    ///
    /// Expected CSV columns (with headers):
    /// district, year, burned_km2, encroach_km2, fire_bio_km2, fire_risk_km2
    ///
    /// Empty or `NA` areas count as zero. Rows with a missing district, a
    /// non-numeric year or a non-numeric area are skipped and logged.
    pub fn parse_fire_csv(csv_object: &str) -> anyhow::Result<Vec<FireRecord>> {
        let mut records = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());

        let mut skipped = 0u32;
        for row in rdr.records() {
            let r = row?;
            let district = r.get(0).unwrap_or("").trim();
            let year = r.get(1).and_then(|s| s.parse::<Year>().ok());
            let areas: Option<Vec<f64>> = (2..6).map(|i| parse_area(r.get(i).unwrap_or(""))).collect();

            match (district.is_empty(), year, areas) {
                (false, Some(year), Some(areas)) => records.push(FireRecord {
                    district: district.to_string(),
                    year,
                    burned_km2: areas[0],
                    encroach_km2: areas[1],
                    fire_bio_km2: areas[2],
                    fire_risk_km2: areas[3],
                }),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            log::warn!("fire: skipped {} malformed rows", skipped);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::FireRecord;
    use crate::layer::Year;

    #[test]
    fn test_parse_fire_csv() {
        let csv_data = "\
district,year,burned_km2,encroach_km2,fire_bio_km2,fire_risk_km2
Chandrapur,2020,8.18,41.2,312.40,96.5
Gondia,2021,NA,3.75,,12
";
        let records = FireRecord::parse_fire_csv(csv_data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].district, "Chandrapur");
        assert_eq!(records[0].year, Year(2020));
        assert!((records[0].burned_km2 - 8.18).abs() < f64::EPSILON);
        assert_eq!(records[1].burned_km2, 0.0);
        assert_eq!(records[1].fire_bio_km2, 0.0);
        assert_eq!(records[1].fire_risk_km2, 12.0);
    }

    #[test]
    fn test_skips_malformed_rows() {
        let csv_data = "\
district,year,burned_km2,encroach_km2,fire_bio_km2,fire_risk_km2
,2020,1,1,1,1
Gondia,twenty,1,1,1,1
Gondia,2020,abc,1,1,1
Gondia,2022,1,2,3,4
";
        let records = FireRecord::parse_fire_csv(csv_data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, Year(2022));
    }

    #[test]
    fn test_embedded_fixture_parses() {
        let records = FireRecord::parse_fire_csv(super::FIRE_RECORDS_CSV).unwrap();
        assert_eq!(records.len(), 12);
        assert!(records.iter().any(|r| r.district == "Chandrapur" && r.year == Year(2021)));
    }
}
