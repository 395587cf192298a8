//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `climatrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use climatrack_core::db::open_db_in_memory;
use climatrack_core::ClimateService;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("climatrack_core version={}", climatrack_core::core_version());

    let conn = open_db_in_memory()?;
    conn.execute(
        "INSERT INTO reference_points (city_name, state, country, latitude, longitude)
         VALUES ('Milano', 'Lombardia', 'Italia', 45.464, 9.190);",
        [],
    )?;

    let service = ClimateService::new(&conn);
    for ranked in service.search_by_coordinate(45.5, 9.2)? {
        println!(
            "match city={} distance_km={:.1}",
            ranked.point.city_name, ranked.distance_km
        );
    }

    Ok(())
}
