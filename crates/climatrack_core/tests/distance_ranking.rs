use climatrack_core::db::open_db_in_memory;
use climatrack_core::{haversine_km, ClimateService};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let conn = open_db_in_memory().unwrap();
    let rows = [
        ("Milano", "Lombardia", "Italia", 45.464, 9.190),
        ("Monza", "Lombardia", "Italia", 45.584, 9.274),
        ("Pavia", "Lombardia", "Italia", 45.185, 9.160),
        ("Bergamo", "Lombardia", "Italia", 45.698, 9.677),
        ("Roma", "Lazio", "Italia", 41.902, 12.496),
    ];
    for (city, state, country, lat, lon) in rows {
        conn.execute(
            "INSERT INTO reference_points (city_name, state, country, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![city, state, country, lat, lon],
        )
        .unwrap();
    }
    conn
}

#[test]
fn proximity_search_ranks_closest_point_first() {
    let conn = setup();
    let service = ClimateService::new(&conn);

    let ranked = service.search_by_coordinate(45.5, 9.2).unwrap();

    // Roma falls outside the 0.5-degree box entirely.
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked[0].point.city_name, "Milano");
    assert!(
        (3.9..4.3).contains(&ranked[0].distance_km),
        "got {}",
        ranked[0].distance_km
    );
}

#[test]
fn proximity_search_distances_are_non_decreasing() {
    let conn = setup();
    let service = ClimateService::new(&conn);

    let ranked = service.search_by_coordinate(45.5, 9.2).unwrap();
    for pair in ranked.windows(2) {
        assert!(pair[0].distance_km <= pair[1].distance_km);
    }
}

#[test]
fn proximity_search_outside_any_box_returns_empty_list() {
    let conn = setup();
    let service = ClimateService::new(&conn);

    assert!(service.search_by_coordinate(-33.9, 151.2).unwrap().is_empty());
}

#[test]
fn ranked_distances_match_direct_haversine() {
    let conn = setup();
    let service = ClimateService::new(&conn);

    for ranked in service.search_by_coordinate(45.5, 9.2).unwrap() {
        let expected = haversine_km(45.5, 9.2, ranked.point.latitude, ranked.point.longitude);
        assert!((ranked.distance_km - expected).abs() < 1e-9);
    }
}
