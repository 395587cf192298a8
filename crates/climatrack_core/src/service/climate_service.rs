//! Climate monitoring query facade.
//!
//! # Responsibility
//! - Compose repositories, the distance ranker and the aggregator into the
//!   synchronous entry points consumed by the external client.
//! - Resolve operator ownership before mutating on an operator's behalf.
//!
//! # Invariants
//! - Zero-row reads return empty collections or sentinel report text, never
//!   errors.
//! - Proximity search results are ordered by ascending distance.

use crate::geo::distance::{rank_by_distance, RankedPoint};
use crate::model::center::{MonitoringCenter, NewCenter};
use crate::model::geo_point::{GeographicPoint, NewPointOfInterest};
use crate::model::observation::{NewObservation, Observation};
use crate::model::operator::{NewOperator, Operator};
use crate::repo::center_repo::{CenterRepository, SqliteCenterRepository};
use crate::repo::observation_repo::{ObservationRepository, SqliteObservationRepository};
use crate::repo::operator_repo::{OperatorRepository, SqliteOperatorRepository};
use crate::repo::point_repo::{PointRepository, SqlitePointRepository};
use crate::repo::{RepoError, RepoResult};
use crate::report::render::{
    render_point_of_interest_report, render_reference_point_report, AREA_NOT_FOUND,
    POINT_OF_INTEREST_NOT_FOUND,
};
use crate::report::summary::{recent_remarks, summarize, GroupingKind, DEFAULT_REMARK_LIMIT};
use rusqlite::Connection;

/// Bounding-box half-width applied by the proximity search, in degrees.
pub const COORDINATE_SEARCH_TOLERANCE_DEG: f64 = 0.5;

/// Synchronous service facade over one store connection.
///
/// The connection is injected by the caller; the facade holds no other
/// state, so one instance per request or one per process both work.
pub struct ClimateService<'conn> {
    conn: &'conn Connection,
    points: SqlitePointRepository<'conn>,
    centers: SqliteCenterRepository<'conn>,
    operators: SqliteOperatorRepository<'conn>,
    observations: SqliteObservationRepository<'conn>,
}

impl<'conn> ClimateService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            points: SqlitePointRepository::new(conn),
            centers: SqliteCenterRepository::new(conn),
            operators: SqliteOperatorRepository::new(conn),
            observations: SqliteObservationRepository::new(conn),
        }
    }

    /// Reference points whose city name contains `name`, in `state`.
    pub fn search_by_name_state(
        &self,
        name: &str,
        state: &str,
    ) -> RepoResult<Vec<GeographicPoint>> {
        self.points.find_by_name_and_state(name, state)
    }

    /// Reference points whose country contains `country`.
    pub fn search_by_country(&self, country: &str) -> RepoResult<Vec<GeographicPoint>> {
        self.points.find_by_country(country)
    }

    /// Reference points near `(latitude, longitude)`, closest first.
    pub fn search_by_coordinate(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> RepoResult<Vec<RankedPoint>> {
        let candidates = self.points.find_by_bounding_box(
            latitude,
            longitude,
            COORDINATE_SEARCH_TOLERANCE_DEG,
        )?;
        Ok(rank_by_distance(latitude, longitude, candidates))
    }

    /// Text report for the reference point named `name` in `state`.
    pub fn view_reference_point_report(&self, name: &str, state: &str) -> RepoResult<String> {
        let Some(point) = self.points.get_reference_point(name, state)? else {
            return Ok(AREA_NOT_FOUND.to_string());
        };

        let summary = summarize(self.conn, point.id, GroupingKind::ReferencePoint)?;
        let remarks = recent_remarks(
            self.conn,
            point.id,
            GroupingKind::ReferencePoint,
            DEFAULT_REMARK_LIMIT,
        )?;
        Ok(render_reference_point_report(&point, &summary, &remarks))
    }

    /// Text report for the point of interest named `name` in `state`.
    pub fn view_point_of_interest_report(&self, name: &str, state: &str) -> RepoResult<String> {
        let Some(details) = self.points.get_point_of_interest(name, state)? else {
            return Ok(POINT_OF_INTEREST_NOT_FOUND.to_string());
        };

        let summary = summarize(self.conn, details.point.id, GroupingKind::PointOfInterest)?;
        let remarks = recent_remarks(
            self.conn,
            details.point.id,
            GroupingKind::PointOfInterest,
            DEFAULT_REMARK_LIMIT,
        )?;
        Ok(render_point_of_interest_report(&details, &summary, &remarks))
    }

    /// Verifies a login id/credential pair.
    pub fn authenticate(&self, login_id: &str, credential: &str) -> RepoResult<bool> {
        self.operators.authenticate(login_id, credential)
    }

    /// Registers a new operator account.
    pub fn register(&self, request: &NewOperator) -> RepoResult<Operator> {
        self.operators.register(request)
    }

    /// Looks up an operator account by login id.
    pub fn get_operator_by_login_id(&self, login_id: &str) -> RepoResult<Option<Operator>> {
        self.operators.get_by_login_id(login_id)
    }

    /// Creates the operator's monitoring center.
    pub fn create_center(&self, request: &NewCenter) -> RepoResult<MonitoringCenter> {
        self.centers.create_center(request)
    }

    /// Creates a point of interest under the operator's center.
    ///
    /// Fails with [`RepoError::MissingCenter`] when the operator has not
    /// created a center yet.
    pub fn create_point_of_interest(
        &self,
        operator_id: i64,
        name: &str,
        state: &str,
        latitude: f64,
        longitude: f64,
    ) -> RepoResult<GeographicPoint> {
        let Some(center_id) = self.centers.center_id_for_operator(operator_id)? else {
            return Err(RepoError::MissingCenter { operator_id });
        };

        self.points.create_point_of_interest(&NewPointOfInterest {
            center_id,
            name: name.to_string(),
            state: state.to_string(),
            latitude,
            longitude,
            category: None,
        })
    }

    /// Points of interest belonging to one center.
    pub fn list_points_for_center(&self, center_id: i64) -> RepoResult<Vec<GeographicPoint>> {
        self.points.points_of_interest_for_center(center_id)
    }

    /// Points of interest belonging to the operator's center.
    pub fn list_points_of_interest_for_operator(
        &self,
        operator_id: i64,
    ) -> RepoResult<Vec<GeographicPoint>> {
        self.points.points_of_interest_for_operator(operator_id)
    }

    /// Appends one validated climate observation.
    pub fn insert_observation(&self, request: &NewObservation) -> RepoResult<Observation> {
        self.observations.insert_observation(request)
    }
}
