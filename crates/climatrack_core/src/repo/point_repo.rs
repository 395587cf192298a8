//! Geographic point repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide search and lookup APIs over reference points.
//! - Provide listing and creation APIs for points of interest.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Reference points are read-only here; only points of interest are ever
//!   inserted.
//! - Searches reject blank inputs instead of matching everything.

use crate::model::geo_point::{is_valid_coordinate, GeographicPoint, NewPointOfInterest};
use crate::repo::{require_non_blank, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

const REFERENCE_POINT_SELECT_SQL: &str = "SELECT
    id,
    city_name,
    state,
    country,
    latitude,
    longitude
FROM reference_points";

const POINT_OF_INTEREST_SELECT_SQL: &str = "SELECT
    id,
    name,
    state,
    center_id,
    latitude,
    longitude,
    category
FROM points_of_interest";

/// Point of interest joined with its owning center's display name, used by
/// the point-of-interest report header.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterestDetails {
    pub point: GeographicPoint,
    pub center_name: String,
}

/// Repository interface for geographic point access.
pub trait PointRepository {
    fn find_by_name_and_state(&self, name: &str, state: &str) -> RepoResult<Vec<GeographicPoint>>;
    fn find_by_country(&self, country: &str) -> RepoResult<Vec<GeographicPoint>>;
    fn find_by_bounding_box(
        &self,
        latitude: f64,
        longitude: f64,
        tolerance: f64,
    ) -> RepoResult<Vec<GeographicPoint>>;
    fn get_reference_point(&self, name: &str, state: &str)
        -> RepoResult<Option<GeographicPoint>>;
    fn get_point_of_interest(
        &self,
        name: &str,
        state: &str,
    ) -> RepoResult<Option<PointOfInterestDetails>>;
    fn points_of_interest_for_center(&self, center_id: i64) -> RepoResult<Vec<GeographicPoint>>;
    fn points_of_interest_for_operator(
        &self,
        operator_id: i64,
    ) -> RepoResult<Vec<GeographicPoint>>;
    fn create_point_of_interest(
        &self,
        request: &NewPointOfInterest,
    ) -> RepoResult<GeographicPoint>;
}

/// SQLite-backed geographic point repository.
pub struct SqlitePointRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePointRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PointRepository for SqlitePointRepository<'_> {
    fn find_by_name_and_state(&self, name: &str, state: &str) -> RepoResult<Vec<GeographicPoint>> {
        require_non_blank("name", name)?;
        require_non_blank("state", state)?;

        let mut stmt = self.conn.prepare(&format!(
            "{REFERENCE_POINT_SELECT_SQL}
             WHERE city_name LIKE ?1 AND state = ?2
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query(params![format!("%{name}%"), state])?;

        collect_reference_points(&mut rows)
    }

    fn find_by_country(&self, country: &str) -> RepoResult<Vec<GeographicPoint>> {
        require_non_blank("country", country)?;

        let mut stmt = self.conn.prepare(&format!(
            "{REFERENCE_POINT_SELECT_SQL}
             WHERE country LIKE ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query(params![format!("%{country}%")])?;

        collect_reference_points(&mut rows)
    }

    fn find_by_bounding_box(
        &self,
        latitude: f64,
        longitude: f64,
        tolerance: f64,
    ) -> RepoResult<Vec<GeographicPoint>> {
        if !is_valid_coordinate(latitude, longitude) || !tolerance.is_finite() || tolerance < 0.0 {
            return Err(RepoError::InvalidArgument(format!(
                "invalid query coordinate ({latitude}, {longitude}) with tolerance {tolerance}"
            )));
        }

        let mut stmt = self.conn.prepare(&format!(
            "{REFERENCE_POINT_SELECT_SQL}
             WHERE latitude BETWEEN ?1 - ?3 AND ?1 + ?3
               AND longitude BETWEEN ?2 - ?3 AND ?2 + ?3
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query(params![latitude, longitude, tolerance])?;

        collect_reference_points(&mut rows)
    }

    fn get_reference_point(
        &self,
        name: &str,
        state: &str,
    ) -> RepoResult<Option<GeographicPoint>> {
        require_non_blank("name", name)?;
        require_non_blank("state", state)?;

        let mut stmt = self.conn.prepare(&format!(
            "{REFERENCE_POINT_SELECT_SQL}
             WHERE city_name = ?1 AND state = ?2;"
        ))?;
        let mut rows = stmt.query(params![name, state])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reference_point_row(row)?));
        }
        Ok(None)
    }

    fn get_point_of_interest(
        &self,
        name: &str,
        state: &str,
    ) -> RepoResult<Option<PointOfInterestDetails>> {
        require_non_blank("name", name)?;
        require_non_blank("state", state)?;

        let mut stmt = self.conn.prepare(
            "SELECT
                p.id,
                p.name,
                p.state,
                p.center_id,
                p.latitude,
                p.longitude,
                p.category,
                c.name AS center_name
             FROM points_of_interest p
             JOIN monitoring_centers c ON p.center_id = c.id
             WHERE p.name = ?1 AND p.state = ?2;",
        )?;
        let mut rows = stmt.query(params![name, state])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(PointOfInterestDetails {
                point: parse_point_of_interest_row(row)?,
                center_name: row.get("center_name")?,
            }));
        }
        Ok(None)
    }

    fn points_of_interest_for_center(&self, center_id: i64) -> RepoResult<Vec<GeographicPoint>> {
        let mut stmt = self.conn.prepare(&format!(
            "{POINT_OF_INTEREST_SELECT_SQL}
             WHERE center_id = ?1
             ORDER BY name ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![center_id])?;

        let mut points = Vec::new();
        while let Some(row) = rows.next()? {
            points.push(parse_point_of_interest_row(row)?);
        }
        Ok(points)
    }

    fn points_of_interest_for_operator(
        &self,
        operator_id: i64,
    ) -> RepoResult<Vec<GeographicPoint>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                p.id,
                p.name,
                p.state,
                p.center_id,
                p.latitude,
                p.longitude,
                p.category
             FROM points_of_interest p
             JOIN monitoring_centers c ON p.center_id = c.id
             WHERE c.operator_id = ?1
             ORDER BY p.name ASC, p.id ASC;",
        )?;
        let mut rows = stmt.query(params![operator_id])?;

        let mut points = Vec::new();
        while let Some(row) = rows.next()? {
            points.push(parse_point_of_interest_row(row)?);
        }
        Ok(points)
    }

    fn create_point_of_interest(
        &self,
        request: &NewPointOfInterest,
    ) -> RepoResult<GeographicPoint> {
        require_non_blank("name", &request.name)?;
        require_non_blank("state", &request.state)?;
        if !is_valid_coordinate(request.latitude, request.longitude) {
            return Err(RepoError::InvalidArgument(format!(
                "invalid coordinate ({}, {})",
                request.latitude, request.longitude
            )));
        }

        let center_exists = self
            .conn
            .query_row(
                "SELECT 1 FROM monitoring_centers WHERE id = ?1;",
                params![request.center_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !center_exists {
            return Err(RepoError::NotFound {
                entity: "monitoring center",
                id: request.center_id,
            });
        }

        self.conn.execute(
            "INSERT INTO points_of_interest (name, state, center_id, latitude, longitude, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                request.name,
                request.state,
                request.center_id,
                request.latitude,
                request.longitude,
                request.category.as_deref(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        info!(
            "event=poi_create module=repo status=ok poi_id={} center_id={}",
            id, request.center_id
        );

        Ok(GeographicPoint {
            id,
            city_name: request.name.clone(),
            state: request.state.clone(),
            country: None,
            latitude: request.latitude,
            longitude: request.longitude,
            center_id: Some(request.center_id),
            category: request.category.clone(),
        })
    }
}

fn collect_reference_points(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<GeographicPoint>> {
    let mut points = Vec::new();
    while let Some(row) = rows.next()? {
        points.push(parse_reference_point_row(row)?);
    }
    Ok(points)
}

fn parse_reference_point_row(row: &Row<'_>) -> RepoResult<GeographicPoint> {
    Ok(GeographicPoint {
        id: row.get("id")?,
        city_name: row.get("city_name")?,
        state: row.get("state")?,
        country: Some(row.get("country")?),
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        center_id: None,
        category: None,
    })
}

fn parse_point_of_interest_row(row: &Row<'_>) -> RepoResult<GeographicPoint> {
    Ok(GeographicPoint {
        id: row.get("id")?,
        city_name: row.get("name")?,
        state: row.get("state")?,
        country: None,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        center_id: Some(row.get("center_id")?),
        category: row.get("category")?,
    })
}
