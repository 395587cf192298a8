//! Observation repository: validated append-only inserts.
//!
//! # Responsibility
//! - Validate observation requests against date and physical ranges.
//! - Verify referential integrity of center/point ids before writing.
//!
//! # Invariants
//! - Existence checks and the insert run in one transaction; callers never
//!   observe a partial write.
//! - Observations are never updated or deleted.

use crate::model::observation::{NewObservation, Observation};
use crate::repo::{RepoError, RepoResult};
use chrono::Local;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

/// Repository interface for climate observations.
pub trait ObservationRepository {
    fn insert_observation(&self, request: &NewObservation) -> RepoResult<Observation>;
}

/// SQLite-backed observation repository.
pub struct SqliteObservationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteObservationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ObservationRepository for SqliteObservationRepository<'_> {
    fn insert_observation(&self, request: &NewObservation) -> RepoResult<Observation> {
        request.validate(Local::now().date_naive())?;

        let tx = self.conn.unchecked_transaction()?;

        require_row(&tx, "monitoring_centers", "monitoring center", request.center_id)?;
        if let Some(poi_id) = request.point_of_interest_id {
            require_row(&tx, "points_of_interest", "point of interest", poi_id)?;
        }
        if let Some(reference_id) = request.reference_point_id {
            require_row(&tx, "reference_points", "reference point", reference_id)?;
        }

        tx.execute(
            "INSERT INTO observations (
                center_id,
                point_of_interest_id,
                reference_point_id,
                observed_on,
                wind,
                humidity,
                pressure,
                temperature,
                precipitation,
                altitude,
                glacier_mass,
                note
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                request.center_id,
                request.point_of_interest_id,
                request.reference_point_id,
                request.observed_on,
                request.measurements.wind,
                request.measurements.humidity,
                request.measurements.pressure,
                request.measurements.temperature,
                request.measurements.precipitation,
                request.measurements.altitude,
                request.measurements.glacier_mass,
                request.note.as_deref(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(
            "event=observation_insert module=repo status=ok observation_id={} center_id={}",
            id, request.center_id
        );

        Ok(Observation {
            id,
            center_id: request.center_id,
            point_of_interest_id: request.point_of_interest_id,
            reference_point_id: request.reference_point_id,
            observed_on: request.observed_on,
            measurements: request.measurements,
            note: request.note.clone(),
        })
    }
}

fn require_row(
    tx: &Transaction<'_>,
    table: &str,
    entity: &'static str,
    id: i64,
) -> RepoResult<()> {
    let exists = tx
        .query_row(
            &format!("SELECT 1 FROM {table} WHERE id = ?1;"),
            params![id],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !exists {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}
