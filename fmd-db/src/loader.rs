//! CSV loading.
//!
//! Format (with headers):
//! `district,year,burned_km2,encroach_km2,fire_bio_km2,fire_risk_km2`

use crate::Database;
use fmd_core::fire::FireRecord;
use rusqlite::params;

impl Database {
    /// Load fire records from a CSV string. Returns the number of rows stored.
    ///
    /// Malformed rows are skipped by the parser. A repeated
    /// (district, year) pair replaces the earlier row.
    pub fn load_fire_records(&self, csv_data: &str) -> anyhow::Result<usize> {
        let records = FireRecord::parse_fire_csv(csv_data)?;
        self.insert_fire_records(&records)
    }

    pub fn insert_fire_records(&self, records: &[FireRecord]) -> anyhow::Result<usize> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO fire_records
                 (district, year, burned_km2, encroach_km2, fire_bio_km2, fire_risk_km2)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in records {
                stmt.execute(params![
                    r.district,
                    r.year.value(),
                    r.burned_km2,
                    r.encroach_km2,
                    r.fire_bio_km2,
                    r.fire_risk_km2
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loader: loaded {} fire records", records.len());
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn load_skips_bad_rows() {
        let db = Database::new().unwrap();
        let loaded = db
            .load_fire_records(
                "district,year,burned_km2,encroach_km2,fire_bio_km2,fire_risk_km2\n\
                 Gondia,2020,1,2,3,4\n\
                 Gondia,2021,---,2,3,4\n\
                 Bhandara,2020,5,6,7,8\n",
            )
            .unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(db.query_districts().unwrap(), vec!["Bhandara", "Gondia"]);
    }

    #[test]
    fn reload_replaces_rows() {
        let db = Database::new().unwrap();
        let header = "district,year,burned_km2,encroach_km2,fire_bio_km2,fire_risk_km2\n";
        db.load_fire_records(&format!("{header}Gondia,2020,1,2,3,4\n")).unwrap();
        db.load_fire_records(&format!("{header}Gondia,2020,10,2,3,4\n")).unwrap();

        let totals = db.query_fire_totals(Some("Gondia"), &[]).unwrap();
        assert_eq!(totals.records, 1);
        assert_eq!(totals.burned_km2, 10.0);
    }
}
