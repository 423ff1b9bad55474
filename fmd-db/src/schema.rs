//! SQL schema for the statistics database.

/// Returns the full SQL schema as a single batch string.
///
/// - `fire_records`: one row per district and year, areas in km²
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS fire_records (
        district TEXT NOT NULL,
        year INTEGER NOT NULL,
        burned_km2 REAL NOT NULL,
        encroach_km2 REAL NOT NULL,
        fire_bio_km2 REAL NOT NULL,
        fire_risk_km2 REAL NOT NULL,
        PRIMARY KEY (district, year)
    );
    CREATE INDEX IF NOT EXISTS idx_fire_year ON fire_records(year);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema()).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='fire_records'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
