//! Monitoring center repository and ownership guard.
//!
//! # Responsibility
//! - Create monitoring centers and resolve operator ownership.
//! - Enforce the one-center-per-operator invariant.
//!
//! # Invariants
//! - `NoCenter -> HasCenter` is a one-way transition per operator; there is
//!   no removal path.
//! - The application-level duplicate check runs inside the same transaction
//!   as the insert; the store UNIQUE constraint backs it under concurrency.

use crate::model::center::{MonitoringCenter, NewCenter};
use crate::repo::{is_unique_violation, require_non_blank, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CENTER_SELECT_SQL: &str = "SELECT
    id,
    operator_id,
    name,
    address,
    postal_code,
    city,
    province
FROM monitoring_centers";

/// Repository interface for monitoring center access.
pub trait CenterRepository {
    fn create_center(&self, request: &NewCenter) -> RepoResult<MonitoringCenter>;
    /// Absence is a valid outcome (the operator has not created a center
    /// yet), not an error.
    fn center_id_for_operator(&self, operator_id: i64) -> RepoResult<Option<i64>>;
    fn get_center(&self, center_id: i64) -> RepoResult<Option<MonitoringCenter>>;
}

/// SQLite-backed monitoring center repository.
pub struct SqliteCenterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCenterRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CenterRepository for SqliteCenterRepository<'_> {
    fn create_center(&self, request: &NewCenter) -> RepoResult<MonitoringCenter> {
        require_non_blank("name", &request.name)?;
        require_non_blank("address", &request.address)?;

        let tx = self.conn.unchecked_transaction()?;

        let operator_exists = tx
            .query_row(
                "SELECT 1 FROM operators WHERE id = ?1;",
                params![request.operator_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !operator_exists {
            return Err(RepoError::NotFound {
                entity: "operator",
                id: request.operator_id,
            });
        }

        let already_owned = tx
            .query_row(
                "SELECT id FROM monitoring_centers WHERE operator_id = ?1;",
                params![request.operator_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        if already_owned.is_some() {
            return Err(RepoError::DuplicateCenter {
                operator_id: request.operator_id,
            });
        }

        let inserted = tx.execute(
            "INSERT INTO monitoring_centers (operator_id, name, address, postal_code, city, province)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                request.operator_id,
                request.name,
                request.address,
                request.postal_code,
                request.city,
                request.province,
            ],
        );
        if let Err(err) = inserted {
            // A concurrent writer can slip past the SELECT; the UNIQUE
            // constraint on operator_id still reports it as a duplicate.
            if is_unique_violation(&err, "monitoring_centers.operator_id") {
                return Err(RepoError::DuplicateCenter {
                    operator_id: request.operator_id,
                });
            }
            return Err(err.into());
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(
            "event=center_create module=repo status=ok center_id={} operator_id={}",
            id, request.operator_id
        );

        Ok(MonitoringCenter {
            id,
            operator_id: request.operator_id,
            name: request.name.clone(),
            address: request.address.clone(),
            postal_code: request.postal_code.clone(),
            city: request.city.clone(),
            province: request.province.clone(),
        })
    }

    fn center_id_for_operator(&self, operator_id: i64) -> RepoResult<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM monitoring_centers WHERE operator_id = ?1;",
                params![operator_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn get_center(&self, center_id: i64) -> RepoResult<Option<MonitoringCenter>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CENTER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![center_id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_center_row(row)?));
        }
        Ok(None)
    }
}

fn parse_center_row(row: &Row<'_>) -> RepoResult<MonitoringCenter> {
    Ok(MonitoringCenter {
        id: row.get("id")?,
        operator_id: row.get("operator_id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        postal_code: row.get("postal_code")?,
        city: row.get("city")?,
        province: row.get("province")?,
    })
}
