use climatrack_core::db::open_db_in_memory;
use climatrack_core::{PointRepository, RepoError, SqlitePointRepository};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let conn = open_db_in_memory().unwrap();
    seed_reference_points(&conn);
    conn
}

fn seed_reference_points(conn: &Connection) {
    let rows = [
        ("Milano", "Lombardia", "Italia", 45.464, 9.190),
        ("Milano Marittima", "Emilia-Romagna", "Italia", 44.276, 12.353),
        ("Varese", "Lombardia", "Italia", 45.820, 8.825),
        ("Lugano", "Ticino", "Svizzera", 46.004, 8.951),
        ("Lyon", "Auvergne-Rhone-Alpes", "Francia", 45.764, 4.835),
    ];
    for (city, state, country, lat, lon) in rows {
        conn.execute(
            "INSERT INTO reference_points (city_name, state, country, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![city, state, country, lat, lon],
        )
        .unwrap();
    }
}

#[test]
fn name_search_matches_substring_within_state() {
    let conn = setup();
    let repo = SqlitePointRepository::new(&conn);

    let hits = repo.find_by_name_and_state("Milano", "Lombardia").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].city_name, "Milano");

    let partial = repo.find_by_name_and_state("ilan", "Lombardia").unwrap();
    assert_eq!(partial.len(), 1);
    assert_eq!(partial[0].city_name, "Milano");
}

#[test]
fn name_search_state_match_is_exact_and_case_sensitive() {
    let conn = setup();
    let repo = SqlitePointRepository::new(&conn);

    assert!(repo
        .find_by_name_and_state("Milano", "lombardia")
        .unwrap()
        .is_empty());
    assert!(repo
        .find_by_name_and_state("Milano", "Lombar")
        .unwrap()
        .is_empty());
}

#[test]
fn name_search_rejects_blank_inputs() {
    let conn = setup();
    let repo = SqlitePointRepository::new(&conn);

    assert!(matches!(
        repo.find_by_name_and_state("", "Lombardia"),
        Err(RepoError::InvalidArgument(_))
    ));
    assert!(matches!(
        repo.find_by_name_and_state("Milano", "   "),
        Err(RepoError::InvalidArgument(_))
    ));
}

#[test]
fn country_search_matches_substring() {
    let conn = setup();
    let repo = SqlitePointRepository::new(&conn);

    let hits = repo.find_by_country("Itali").unwrap();
    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|point| point.country.as_deref() == Some("Italia")));

    assert!(matches!(
        repo.find_by_country(""),
        Err(RepoError::InvalidArgument(_))
    ));
}

#[test]
fn country_search_with_no_match_returns_empty_list() {
    let conn = setup();
    let repo = SqlitePointRepository::new(&conn);

    assert!(repo.find_by_country("Atlantide").unwrap().is_empty());
}

#[test]
fn bounding_box_never_exceeds_tolerance() {
    let conn = setup();
    let repo = SqlitePointRepository::new(&conn);

    let (lat, lon, tolerance) = (45.5, 9.2, 0.5);
    let hits = repo.find_by_bounding_box(lat, lon, tolerance).unwrap();

    assert!(!hits.is_empty());
    for point in &hits {
        assert!((point.latitude - lat).abs() <= tolerance, "{point:?}");
        assert!((point.longitude - lon).abs() <= tolerance, "{point:?}");
    }
    // Lugano misses the latitude bound by 0.004 degrees; Lyon misses the
    // longitude bound by a wide margin.
    assert!(hits.iter().all(|point| point.city_name != "Lugano"));
    assert!(hits.iter().all(|point| point.city_name != "Lyon"));
}

#[test]
fn bounding_box_rejects_non_finite_coordinates() {
    let conn = setup();
    let repo = SqlitePointRepository::new(&conn);

    assert!(matches!(
        repo.find_by_bounding_box(f64::NAN, 9.2, 0.5),
        Err(RepoError::InvalidArgument(_))
    ));
    assert!(matches!(
        repo.find_by_bounding_box(45.5, 9.2, -1.0),
        Err(RepoError::InvalidArgument(_))
    ));
}

#[test]
fn reference_point_lookup_is_exact_match() {
    let conn = setup();
    let repo = SqlitePointRepository::new(&conn);

    let found = repo.get_reference_point("Milano", "Lombardia").unwrap();
    assert_eq!(found.unwrap().city_name, "Milano");

    assert!(repo.get_reference_point("Milan", "Lombardia").unwrap().is_none());
}
