use chrono::Local;
use climatrack_core::db::open_db_in_memory;
use climatrack_core::{
    ClimateService, Measurements, NewCenter, NewObservation, NewOperator, RepoError,
};
use rusqlite::Connection;

struct Fixture {
    conn: Connection,
    center_id: i64,
    poi_id: i64,
    reference_id: i64,
}

fn setup() -> Fixture {
    let conn = open_db_in_memory().unwrap();
    let (center_id, poi_id, reference_id) = {
        let service = ClimateService::new(&conn);
        let operator = service
            .register(&NewOperator {
                first_name: "Ada".to_string(),
                last_name: "Rossi".to_string(),
                national_id: "RSSMRA85T10A562S".to_string(),
                email: "ada@example.com".to_string(),
                login_id: "ada".to_string(),
                credential: "secret".to_string(),
            })
            .unwrap();
        let center = service
            .create_center(&NewCenter {
                operator_id: operator.id,
                name: "Centro Nord".to_string(),
                address: "Via Roma 1".to_string(),
                postal_code: "21100".to_string(),
                city: "Varese".to_string(),
                province: "VA".to_string(),
            })
            .unwrap();
        let poi = service
            .create_point_of_interest(operator.id, "Ghiacciaio Forni", "Lombardia", 46.397, 10.588)
            .unwrap();
        conn.execute(
            "INSERT INTO reference_points (city_name, state, country, latitude, longitude)
             VALUES ('Milano', 'Lombardia', 'Italia', 45.464, 9.190);",
            [],
        )
        .unwrap();
        let reference_id = conn.last_insert_rowid();
        (center.id, poi.id, reference_id)
    };
    Fixture {
        conn,
        center_id,
        poi_id,
        reference_id,
    }
}

fn measurements() -> Measurements {
    Measurements {
        wind: 10,
        humidity: 60,
        pressure: 1013,
        temperature: 4,
        precipitation: 0,
        altitude: 2600,
        glacier_mass: 900,
    }
}

fn request(fixture: &Fixture) -> NewObservation {
    NewObservation {
        center_id: fixture.center_id,
        point_of_interest_id: Some(fixture.poi_id),
        reference_point_id: None,
        observed_on: Local::now().date_naive(),
        measurements: measurements(),
        note: None,
    }
}

#[test]
fn accepts_todays_date_and_boundary_temperature() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.measurements.temperature = -273;

    let observation = service.insert_observation(&req).unwrap();
    assert!(observation.id > 0);
    assert_eq!(observation.measurements.temperature, -273);
}

#[test]
fn rejects_temperature_below_absolute_zero() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.measurements.temperature = -300;

    let err = service.insert_observation(&req).unwrap_err();
    assert!(matches!(err, RepoError::InvalidArgument(_)));
    assert_eq!(observation_count(&fixture.conn), 0);
}

#[test]
fn rejects_date_one_day_in_the_future() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.observed_on = Local::now().date_naive().succ_opt().unwrap();

    let err = service.insert_observation(&req).unwrap_err();
    assert!(matches!(err, RepoError::InvalidArgument(_)));
    assert_eq!(observation_count(&fixture.conn), 0);
}

#[test]
fn rejects_out_of_range_humidity() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.measurements.humidity = 101;
    assert!(matches!(
        service.insert_observation(&req).unwrap_err(),
        RepoError::InvalidArgument(_)
    ));

    req.measurements.humidity = -1;
    assert!(matches!(
        service.insert_observation(&req).unwrap_err(),
        RepoError::InvalidArgument(_)
    ));
}

#[test]
fn rejects_unknown_center() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.center_id = 999;

    let err = service.insert_observation(&req).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "monitoring center",
            id: 999
        }
    ));
    assert_eq!(observation_count(&fixture.conn), 0);
}

#[test]
fn rejects_unknown_point_of_interest_without_partial_write() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.point_of_interest_id = Some(999);

    let err = service.insert_observation(&req).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "point of interest",
            id: 999
        }
    ));
    assert_eq!(observation_count(&fixture.conn), 0);
}

#[test]
fn rejects_unknown_reference_point() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.point_of_interest_id = None;
    req.reference_point_id = Some(999);

    let err = service.insert_observation(&req).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "reference point",
            id: 999
        }
    ));
}

#[test]
fn rejects_observation_targeting_both_point_kinds() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.reference_point_id = Some(fixture.reference_id);

    assert!(matches!(
        service.insert_observation(&req).unwrap_err(),
        RepoError::InvalidArgument(_)
    ));
}

#[test]
fn center_scoped_observation_needs_no_point_id() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.point_of_interest_id = None;

    let observation = service.insert_observation(&req).unwrap();
    assert_eq!(observation.point_of_interest_id, None);
    assert_eq!(observation.reference_point_id, None);
    assert_eq!(observation.center_id, fixture.center_id);
    assert_eq!(observation_count(&fixture.conn), 1);
}

#[test]
fn reference_point_observation_roundtrips() {
    let fixture = setup();
    let service = ClimateService::new(&fixture.conn);

    let mut req = request(&fixture);
    req.point_of_interest_id = None;
    req.reference_point_id = Some(fixture.reference_id);
    req.note = Some("clear sky".to_string());

    let observation = service.insert_observation(&req).unwrap();
    assert_eq!(observation.reference_point_id, Some(fixture.reference_id));
    assert_eq!(observation.note.as_deref(), Some("clear sky"));
}

fn observation_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM observations;", [], |row| row.get(0))
        .unwrap()
}
