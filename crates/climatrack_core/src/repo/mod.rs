//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQL details from service/business orchestration.
//! - Provide the one failure taxonomy shared by repositories, aggregation and
//!   the facade.
//!
//! # Invariants
//! - Write paths validate domain records before SQL mutations.
//! - Store-level failures are always propagated, never logged-and-dropped.
//! - Zero-row reads are empty collections or `None`, not errors.

use crate::db::DbError;
use crate::model::observation::ObservationValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod center_repo;
pub mod observation_repo;
pub mod operator_repo;
pub mod point_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure taxonomy for every engine operation.
#[derive(Debug)]
pub enum RepoError {
    /// Malformed or missing input: blank query fields, out-of-range
    /// measurements, future-dated observations, duplicate login ids.
    InvalidArgument(String),
    /// A referenced row does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// The operator already owns a monitoring center.
    DuplicateCenter { operator_id: i64 },
    /// Point-of-interest creation attempted by an operator without a center.
    MissingCenter { operator_id: i64 },
    /// Store transport/bootstrap failure.
    Store(DbError),
    /// Persisted data cannot be decoded into a valid domain record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateCenter { operator_id } => {
                write!(f, "operator {operator_id} already owns a monitoring center")
            }
            Self::MissingCenter { operator_id } => {
                write!(f, "operator {operator_id} has no monitoring center")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(DbError::Sqlite(value))
    }
}

impl From<ObservationValidationError> for RepoError {
    fn from(value: ObservationValidationError) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}

/// Rejects blank required text input with a field-specific message.
pub(crate) fn require_non_blank(field: &'static str, value: &str) -> RepoResult<()> {
    if value.trim().is_empty() {
        return Err(RepoError::InvalidArgument(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}

/// Returns whether `err` is a UNIQUE-constraint violation whose message
/// names `column`.
pub(crate) fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, Some(message)) => {
            code.code == rusqlite::ErrorCode::ConstraintViolation && message.contains(column)
        }
        _ => false,
    }
}
