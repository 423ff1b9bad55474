//! In-memory SQLite store for district fire and encroachment statistics.
//!
//! The dashboard's statistics panel sums burned area, encroachment and fire
//! risk figures over the selected district and years. The figures ship as a
//! CSV fixture embedded at compile time; this crate loads it into SQLite and
//! answers the aggregate queries.
//!
//! - `Rc<RefCell<Connection>>` so clones share one connection inside the
//!   single-threaded WASM runtime
//! - In-memory SQLite via `rusqlite` (bundled, builds for `wasm32-unknown-unknown`)
//!
//! # Usage
//!
//! ```rust
//! use fmd_db::Database;
//! use fmd_core::layer::Year;
//!
//! let db = Database::new().unwrap();
//! db.load_fire_records("district,year,burned_km2,encroach_km2,fire_bio_km2,fire_risk_km2\nGondia,2021,187.63,11.02,340.29,119.66\n").unwrap();
//!
//! let totals = db.query_fire_totals(Some("Gondia"), &[Year(2021)]).unwrap();
//! assert_eq!(totals.records, 1);
//! ```

pub mod models;
pub mod schema;
mod loader;
mod queries;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the in-memory statistics database.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create an empty in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Create a database pre-loaded with the embedded fixture.
    pub fn with_embedded_records() -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_fire_records(fmd_core::fire::FIRE_RECORDS_CSV)?;
        Ok(db)
    }
}
