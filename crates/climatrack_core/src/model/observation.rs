//! Climate observation domain model and validation.
//!
//! # Responsibility
//! - Define the seven-parameter measurement record and its physical ranges.
//! - Validate observation requests before any SQL mutation.
//!
//! # Invariants
//! - An observation targets at most one of {point of interest, reference
//!   point}; both absent means it is scoped to the center itself.
//! - The observation date is never in the future relative to insert time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest physically meaningful temperature in °C.
pub const MIN_TEMPERATURE_C: i32 = -273;
/// Lowest accepted site altitude in meters (below-sea-level glacier sites).
pub const MIN_ALTITUDE_M: i32 = -420;

/// Validation failure for an observation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservationValidationError {
    /// Observation date lies strictly after the current date.
    FutureDate {
        observed_on: NaiveDate,
        today: NaiveDate,
    },
    /// A measurement falls outside its declared physical range.
    MeasurementOutOfRange {
        parameter: &'static str,
        value: i32,
        min: i32,
        max: Option<i32>,
    },
    /// Both a point-of-interest id and a reference-point id were supplied.
    ConflictingSubject,
}

impl Display for ObservationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FutureDate { observed_on, today } => write!(
                f,
                "observation date {observed_on} lies after the current date {today}"
            ),
            Self::MeasurementOutOfRange {
                parameter,
                value,
                min,
                max,
            } => match max {
                Some(max) => write!(
                    f,
                    "{parameter} value {value} outside allowed range [{min}, {max}]"
                ),
                None => write!(f, "{parameter} value {value} below allowed minimum {min}"),
            },
            Self::ConflictingSubject => write!(
                f,
                "observation cannot target both a point of interest and a reference point"
            ),
        }
    }
}

impl Error for ObservationValidationError {}

/// The seven integer climate parameters of one observation.
///
/// Units are a display convention (m/s, %, hPa, °C, mm, m, kg/m³) and are not
/// part of the stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurements {
    pub wind: i32,
    pub humidity: i32,
    pub pressure: i32,
    pub temperature: i32,
    pub precipitation: i32,
    pub altitude: i32,
    pub glacier_mass: i32,
}

impl Measurements {
    /// Checks every parameter against its physical range.
    pub fn validate(&self) -> Result<(), ObservationValidationError> {
        check_min("wind", self.wind, 0)?;
        check_range("humidity", self.humidity, 0, 100)?;
        check_min("pressure", self.pressure, 0)?;
        check_min("temperature", self.temperature, MIN_TEMPERATURE_C)?;
        check_min("precipitation", self.precipitation, 0)?;
        check_min("altitude", self.altitude, MIN_ALTITUDE_M)?;
        check_min("glacier_mass", self.glacier_mass, 0)?;
        Ok(())
    }
}

fn check_min(
    parameter: &'static str,
    value: i32,
    min: i32,
) -> Result<(), ObservationValidationError> {
    if value < min {
        return Err(ObservationValidationError::MeasurementOutOfRange {
            parameter,
            value,
            min,
            max: None,
        });
    }
    Ok(())
}

fn check_range(
    parameter: &'static str,
    value: i32,
    min: i32,
    max: i32,
) -> Result<(), ObservationValidationError> {
    if value < min || value > max {
        return Err(ObservationValidationError::MeasurementOutOfRange {
            parameter,
            value,
            min,
            max: Some(max),
        });
    }
    Ok(())
}

/// One persisted climate observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: i64,
    pub center_id: i64,
    pub point_of_interest_id: Option<i64>,
    pub reference_point_id: Option<i64>,
    pub observed_on: NaiveDate,
    pub measurements: Measurements,
    pub note: Option<String>,
}

/// Request model for appending an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObservation {
    pub center_id: i64,
    pub point_of_interest_id: Option<i64>,
    pub reference_point_id: Option<i64>,
    pub observed_on: NaiveDate,
    pub measurements: Measurements,
    pub note: Option<String>,
}

impl NewObservation {
    /// Validates the request against `today` and the measurement ranges.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ObservationValidationError> {
        if self.point_of_interest_id.is_some() && self.reference_point_id.is_some() {
            return Err(ObservationValidationError::ConflictingSubject);
        }
        if self.observed_on > today {
            return Err(ObservationValidationError::FutureDate {
                observed_on: self.observed_on,
                today,
            });
        }
        self.measurements.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{Measurements, NewObservation, ObservationValidationError};
    use chrono::NaiveDate;

    fn measurements() -> Measurements {
        Measurements {
            wind: 10,
            humidity: 60,
            pressure: 1013,
            temperature: 4,
            precipitation: 0,
            altitude: 1200,
            glacier_mass: 900,
        }
    }

    fn request(observed_on: NaiveDate) -> NewObservation {
        NewObservation {
            center_id: 1,
            point_of_interest_id: None,
            reference_point_id: Some(1),
            observed_on,
            measurements: measurements(),
            note: None,
        }
    }

    #[test]
    fn temperature_boundary_is_inclusive() {
        let mut values = measurements();
        values.temperature = -273;
        assert!(values.validate().is_ok());

        values.temperature = -274;
        assert!(matches!(
            values.validate(),
            Err(ObservationValidationError::MeasurementOutOfRange {
                parameter: "temperature",
                ..
            })
        ));
    }

    #[test]
    fn humidity_has_upper_bound() {
        let mut values = measurements();
        values.humidity = 100;
        assert!(values.validate().is_ok());

        values.humidity = 101;
        assert!(matches!(
            values.validate(),
            Err(ObservationValidationError::MeasurementOutOfRange {
                parameter: "humidity",
                max: Some(100),
                ..
            })
        ));
    }

    #[test]
    fn altitude_allows_below_sea_level_sites() {
        let mut values = measurements();
        values.altitude = -420;
        assert!(values.validate().is_ok());

        values.altitude = -421;
        assert!(values.validate().is_err());
    }

    #[test]
    fn rejects_future_dates_but_accepts_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        assert!(request(today).validate(today).is_ok());

        let tomorrow = today.succ_opt().unwrap();
        assert!(matches!(
            request(tomorrow).validate(today),
            Err(ObservationValidationError::FutureDate { .. })
        ));
    }

    #[test]
    fn rejects_both_subject_ids() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut req = request(today);
        req.point_of_interest_id = Some(2);

        assert_eq!(
            req.validate(today),
            Err(ObservationValidationError::ConflictingSubject)
        );
    }
}
