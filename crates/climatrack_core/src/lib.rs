//! Core engine for climatrack: geographic point search and climate
//! observation aggregation over a relational store.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use geo::distance::{haversine_km, rank_by_distance, RankedPoint, EARTH_RADIUS_KM};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::center::{MonitoringCenter, NewCenter};
pub use model::geo_point::{GeographicPoint, NewPointOfInterest};
pub use model::observation::{
    Measurements, NewObservation, Observation, ObservationValidationError,
};
pub use model::operator::{NewOperator, Operator};
pub use repo::center_repo::{CenterRepository, SqliteCenterRepository};
pub use repo::observation_repo::{ObservationRepository, SqliteObservationRepository};
pub use repo::operator_repo::{OperatorRepository, SqliteOperatorRepository};
pub use repo::point_repo::{PointOfInterestDetails, PointRepository, SqlitePointRepository};
pub use repo::{RepoError, RepoResult};
pub use report::summary::{
    recent_remarks, summarize, GroupingKind, Remark, Summary, DEFAULT_REMARK_LIMIT,
};
pub use service::climate_service::{ClimateService, COORDINATE_SEARCH_TOLERANCE_DEG};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
