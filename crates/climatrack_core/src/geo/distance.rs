//! Great-circle distance and proximity ranking.
//!
//! # Responsibility
//! - Compute haversine distance between coordinate pairs.
//! - Order candidate points by ascending distance from a query origin.
//!
//! # Invariants
//! - Functions are pure; no connection handle is ever touched here.
//! - Equal distances preserve the candidates' original relative order.

use crate::model::geo_point::GeographicPoint;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// One candidate paired with its distance from the query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPoint {
    pub point: GeographicPoint,
    pub distance_km: f64,
}

/// Haversine distance in kilometers between two coordinates in decimal
/// degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat_delta = (lat2 - lat1).to_radians();
    let lon_delta = (lon2 - lon1).to_radians();

    let a = (lat_delta / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (lon_delta / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Orders `candidates` by ascending distance from `(lat, lon)`.
///
/// The sort is stable: candidates at equal distance keep the order in which
/// the repository returned them.
pub fn rank_by_distance(lat: f64, lon: f64, candidates: Vec<GeographicPoint>) -> Vec<RankedPoint> {
    let mut ranked: Vec<RankedPoint> = candidates
        .into_iter()
        .map(|point| {
            let distance_km = haversine_km(lat, lon, point.latitude, point.longitude);
            RankedPoint { point, distance_km }
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
