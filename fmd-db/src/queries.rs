//! Aggregate queries behind the statistics panel.
//!
//! A `None` district means every district; an empty year slice means every
//! year. Sums are rounded to two decimals.

use crate::models::{FireTotals, FireYearRow};
use crate::Database;
use fmd_core::layer::Year;
use rusqlite::types::Value;
use rusqlite::params_from_iter;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `WHERE` clause and bound values for a district/year filter.
fn selection_filter(district: Option<&str>, years: &[Year]) -> (String, Vec<Value>) {
    let mut clauses = Vec::new();
    let mut values = Vec::new();

    if let Some(d) = district {
        values.push(Value::Text(d.to_string()));
        clauses.push(format!("district = ?{}", values.len()));
    }
    if !years.is_empty() {
        let placeholders: Vec<String> = years
            .iter()
            .map(|y| {
                values.push(Value::Integer(i64::from(y.value())));
                format!("?{}", values.len())
            })
            .collect();
        clauses.push(format!("year IN ({})", placeholders.join(", ")));
    }

    if clauses.is_empty() {
        (String::new(), values)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), values)
    }
}

impl Database {
    /// Distinct district names, sorted.
    pub fn query_districts(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT DISTINCT district FROM fire_records ORDER BY district")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Distinct years present, ascending.
    pub fn query_years(&self) -> anyhow::Result<Vec<Year>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT DISTINCT year FROM fire_records ORDER BY year")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, u16>(0).map(Year))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Summed areas for the panel counters.
    pub fn query_fire_totals(
        &self,
        district: Option<&str>,
        years: &[Year],
    ) -> anyhow::Result<FireTotals> {
        let (filter, values) = selection_filter(district, years);
        let sql = format!(
            "SELECT COALESCE(SUM(burned_km2), 0.0), COALESCE(SUM(encroach_km2), 0.0),
                    COALESCE(SUM(fire_bio_km2), 0.0), COALESCE(SUM(fire_risk_km2), 0.0),
                    COUNT(*)
             FROM fire_records {filter}"
        );
        let conn = self.conn.borrow();
        let totals = conn.query_row(&sql, params_from_iter(values), |row| {
            Ok(FireTotals {
                burned_km2: round2(row.get(0)?),
                encroach_km2: round2(row.get(1)?),
                fire_bio_km2: round2(row.get(2)?),
                fire_risk_km2: round2(row.get(3)?),
                records: row.get(4)?,
            })
        })?;
        log::debug!(
            "query: fire totals for {} over {} year(s): {} rows",
            district.unwrap_or("all districts"),
            years.len(),
            totals.records
        );
        Ok(totals)
    }

    /// Per-year sums for `district` (all districts when `None`), ascending.
    pub fn query_fire_by_year(&self, district: Option<&str>) -> anyhow::Result<Vec<FireYearRow>> {
        let (filter, values) = selection_filter(district, &[]);
        let sql = format!(
            "SELECT year, SUM(burned_km2), SUM(encroach_km2), SUM(fire_bio_km2), SUM(fire_risk_km2)
             FROM fire_records {filter}
             GROUP BY year
             ORDER BY year"
        );
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values), |row| {
                Ok(FireYearRow {
                    year: Year(row.get(0)?),
                    burned_km2: round2(row.get(1)?),
                    encroach_km2: round2(row.get(2)?),
                    fire_bio_km2: round2(row.get(3)?),
                    fire_risk_km2: round2(row.get(4)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use fmd_core::layer::Year;

    fn sample_db() -> Database {
        Database::with_embedded_records().unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn chandrapur_2020_2021_totals() {
        let db = sample_db();
        let t = db
            .query_fire_totals(Some("Chandrapur"), &[Year(2020), Year(2021)])
            .unwrap();
        assert!(close(t.burned_km2, 771.67), "burned was {}", t.burned_km2);
        assert!(close(t.fire_bio_km2, 1535.23), "fire_bio was {}", t.fire_bio_km2);
        assert_eq!(t.records, 2);
    }

    #[test]
    fn empty_years_means_all_years() {
        let db = sample_db();
        let all = db.query_fire_totals(Some("Gondia"), &[]).unwrap();
        assert_eq!(all.records, 3);
        assert!(close(all.burned_km2, 3.42 + 187.63 + 46.90));
    }

    #[test]
    fn no_district_means_all_districts() {
        let db = sample_db();
        let t = db.query_fire_totals(None, &[Year(2020)]).unwrap();
        assert_eq!(t.records, 4);
        assert!(close(t.burned_km2, 8.18 + 54.71 + 3.42 + 1.96));

        let everything = db.query_fire_totals(None, &[]).unwrap();
        assert_eq!(everything.records, 12);
    }

    #[test]
    fn unknown_district_sums_to_zero() {
        let db = sample_db();
        let t = db.query_fire_totals(Some("Nagpur"), &[Year(2021)]).unwrap();
        assert_eq!(t.records, 0);
        assert_eq!(t.burned_km2, 0.0);
    }

    #[test]
    fn by_year_is_ascending() {
        let db = sample_db();
        let rows = db.query_fire_by_year(Some("Chandrapur")).unwrap();
        let years: Vec<Year> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![Year(2020), Year(2021), Year(2022)]);
        assert!(close(rows[1].burned_km2, 763.49));

        let all = db.query_fire_by_year(None).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn districts_and_years() {
        let db = sample_db();
        assert_eq!(
            db.query_districts().unwrap(),
            vec!["Bhandara", "Chandrapur", "Gadchiroli", "Gondia"]
        );
        assert_eq!(db.query_years().unwrap(), Year::SELECTABLE.to_vec());
    }
}
