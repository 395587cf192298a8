//! Geographic point read model.
//!
//! # Responsibility
//! - Represent both point categories behind one shape: pre-seeded reference
//!   points and operator-defined points of interest.
//!
//! # Invariants
//! - Reference points carry a country and no owning center.
//! - Points of interest carry an owning center and no country.

use serde::{Deserialize, Serialize};

/// One geographic location known to the system.
///
/// Reference points are seed data available to every user; points of
/// interest belong to exactly one monitoring center. Both travel across the
/// transport boundary, hence the serde derives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicPoint {
    /// Stable store-assigned id.
    pub id: i64,
    /// City or site name.
    pub city_name: String,
    /// State or region.
    pub state: String,
    /// Country; `None` for points of interest.
    pub country: Option<String>,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Owning monitoring center; `None` for reference points.
    pub center_id: Option<i64>,
    /// Optional free-form category tag.
    pub category: Option<String>,
}

impl GeographicPoint {
    /// Returns whether this point is an operator-defined point of interest.
    pub fn is_point_of_interest(&self) -> bool {
        self.center_id.is_some()
    }
}

/// Request model for creating a point of interest under a center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPointOfInterest {
    pub center_id: i64,
    pub name: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<String>,
}

/// Returns whether the pair is a plausible WGS84 coordinate.
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}
