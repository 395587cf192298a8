//! Operator account repository: registration and authentication.
//!
//! # Responsibility
//! - Persist operator registrations after format validation.
//! - Resolve accounts by login id and verify credentials.
//!
//! # Invariants
//! - `login_id` is unique; a duplicate registration is rejected, never
//!   silently overwritten.
//! - Failed authentication is a `false` outcome, not an error.

use crate::model::operator::{is_valid_national_id, NewOperator, Operator};
use crate::repo::{is_unique_violation, require_non_blank, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};

const OPERATOR_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    national_id,
    email,
    login_id,
    credential
FROM operators";

/// Repository interface for operator accounts.
pub trait OperatorRepository {
    fn register(&self, request: &NewOperator) -> RepoResult<Operator>;
    fn authenticate(&self, login_id: &str, credential: &str) -> RepoResult<bool>;
    fn get_by_login_id(&self, login_id: &str) -> RepoResult<Option<Operator>>;
}

/// SQLite-backed operator repository.
pub struct SqliteOperatorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOperatorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl OperatorRepository for SqliteOperatorRepository<'_> {
    fn register(&self, request: &NewOperator) -> RepoResult<Operator> {
        require_non_blank("first name", &request.first_name)?;
        require_non_blank("last name", &request.last_name)?;
        require_non_blank("national id", &request.national_id)?;
        require_non_blank("email", &request.email)?;
        require_non_blank("login id", &request.login_id)?;
        require_non_blank("credential", &request.credential)?;

        if !is_valid_national_id(&request.national_id) {
            return Err(RepoError::InvalidArgument(format!(
                "malformed national id `{}`",
                request.national_id
            )));
        }
        if !request.email.contains('@') {
            return Err(RepoError::InvalidArgument(format!(
                "malformed email address `{}`",
                request.email
            )));
        }

        let inserted = self.conn.execute(
            "INSERT INTO operators (first_name, last_name, national_id, email, login_id, credential)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                request.first_name,
                request.last_name,
                request.national_id,
                request.email,
                request.login_id,
                request.credential,
            ],
        );
        if let Err(err) = inserted {
            if is_unique_violation(&err, "operators.login_id") {
                return Err(RepoError::InvalidArgument(format!(
                    "login id `{}` is already in use",
                    request.login_id
                )));
            }
            return Err(err.into());
        }
        let id = self.conn.last_insert_rowid();

        info!(
            "event=operator_register module=repo status=ok operator_id={}",
            id
        );

        Ok(Operator {
            id,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            national_id: request.national_id.clone(),
            email: request.email.clone(),
            login_id: request.login_id.clone(),
            credential: request.credential.clone(),
        })
    }

    fn authenticate(&self, login_id: &str, credential: &str) -> RepoResult<bool> {
        let mut stmt = self.conn.prepare(
            "SELECT 1 FROM operators WHERE login_id = ?1 AND credential = ?2;",
        )?;
        let mut rows = stmt.query(params![login_id, credential])?;
        Ok(rows.next()?.is_some())
    }

    fn get_by_login_id(&self, login_id: &str) -> RepoResult<Option<Operator>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OPERATOR_SELECT_SQL} WHERE login_id = ?1;"))?;
        let mut rows = stmt.query(params![login_id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_operator_row(row)?));
        }
        Ok(None)
    }
}

fn parse_operator_row(row: &Row<'_>) -> RepoResult<Operator> {
    Ok(Operator {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        national_id: row.get("national_id")?,
        email: row.get("email")?,
        login_id: row.get("login_id")?,
        credential: row.get("credential")?,
    })
}
