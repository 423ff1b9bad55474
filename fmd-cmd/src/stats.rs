//! `stats`: fire and encroachment totals from a CSV file.

use fmd_core::fire::FIRE_RECORDS_CSV;
use fmd_core::layer::Year;
use fmd_db::Database;
use log::info;

pub fn run_stats(
    fire_csv: Option<&str>,
    district: Option<&str>,
    years: &[Year],
    json: bool,
) -> anyhow::Result<()> {
    let csv_data = match fire_csv {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?,
        None => FIRE_RECORDS_CSV.to_string(),
    };

    let db = Database::new()?;
    let loaded = db.load_fire_records(&csv_data)?;
    info!("Loaded {} fire records", loaded);

    let totals = db.query_fire_totals(district, years)?;
    let by_year = db.query_fire_by_year(district)?;

    if json {
        let out = serde_json::json!({
            "district": district,
            "years": years,
            "totals": totals,
            "by_year": by_year,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let scope_years = if years.is_empty() {
        "all years".to_string()
    } else {
        years.iter().map(|y| y.to_string()).collect::<Vec<_>>().join(", ")
    };
    println!("{} ({})", district.unwrap_or("All districts"), scope_years);
    println!("  Burned forest:              {:>10.2} km²", totals.burned_km2);
    println!("  Encroachment:               {:>10.2} km²", totals.encroach_km2);
    println!("  Fire in biodiversity zones: {:>10.2} km²", totals.fire_bio_km2);
    println!("  High fire risk:             {:>10.2} km²", totals.fire_risk_km2);
    println!("  Records:                    {:>10}", totals.records);

    println!();
    println!("{:<6} {:>10} {:>10} {:>10} {:>10}", "year", "burned", "encroach", "fire_bio", "fire_risk");
    for row in by_year {
        println!(
            "{:<6} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            row.year, row.burned_km2, row.encroach_km2, row.fire_bio_km2, row.fire_risk_km2
        );
    }
    Ok(())
}
