//! Conditional aggregation over the three observation groupings.
//!
//! # Responsibility
//! - Count, average and list observations for one grouping key.
//! - Fetch the capped list of recent non-blank remarks.
//!
//! # Invariants
//! - The grouping kind only selects the filter column and the operator join;
//!   the aggregation logic is shared.
//! - Detail ordering is deterministic: observation date descending, id
//!   descending as tiebreak.

use crate::model::observation::Measurements;
use crate::repo::RepoResult;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

/// Default cap on the recent-remarks listing.
pub const DEFAULT_REMARK_LIMIT: u32 = 5;

/// Dimension used to filter and aggregate observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingKind {
    ReferencePoint,
    PointOfInterest,
    Center,
}

impl GroupingKind {
    /// Observation column holding the grouping foreign key.
    pub fn filter_column(self) -> &'static str {
        match self {
            Self::ReferencePoint => "reference_point_id",
            Self::PointOfInterest => "point_of_interest_id",
            Self::Center => "center_id",
        }
    }

    /// Whether detail rows carry the recording operator's name.
    ///
    /// Center- and point-of-interest-scoped queries pass through the
    /// center -> operator join; reference-point queries do not.
    pub fn joins_operator(self) -> bool {
        !matches!(self, Self::ReferencePoint)
    }
}

/// Arithmetic means of the seven measurement columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterAverages {
    pub wind: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub temperature: f64,
    pub precipitation: f64,
    pub altitude: f64,
    pub glacier_mass: f64,
}

/// Name of the operator whose center recorded an observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorName {
    pub first_name: String,
    pub last_name: String,
}

/// One observation in the chronological detail listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationDetail {
    /// Recording operator; `None` for grouping kinds without the join.
    pub operator: Option<OperatorName>,
    pub observed_on: NaiveDate,
    pub measurements: Measurements,
    pub note: Option<String>,
}

/// Statistical summary over one grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub observation_count: i64,
    /// `None` when no observations match.
    pub averages: Option<ParameterAverages>,
    /// Ordered by observation date descending; empty when no observations
    /// match.
    pub details: Vec<ObservationDetail>,
}

impl Summary {
    pub fn has_observations(&self) -> bool {
        self.observation_count > 0
    }
}

/// One recent free-text remark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remark {
    pub observed_on: NaiveDate,
    pub note: String,
}

/// Computes the statistical summary for `grouping_id` under `kind`.
///
/// Zero matching observations yields a count of 0, no averages and no detail
/// rows; no average computation is performed in that case.
pub fn summarize(conn: &Connection, grouping_id: i64, kind: GroupingKind) -> RepoResult<Summary> {
    let column = kind.filter_column();

    let observation_count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM observations WHERE {column} = ?1;"),
        params![grouping_id],
        |row| row.get(0),
    )?;

    if observation_count == 0 {
        return Ok(Summary {
            observation_count: 0,
            averages: None,
            details: Vec::new(),
        });
    }

    let averages = conn.query_row(
        &format!(
            "SELECT
                AVG(wind),
                AVG(humidity),
                AVG(pressure),
                AVG(temperature),
                AVG(precipitation),
                AVG(altitude),
                AVG(glacier_mass)
             FROM observations
             WHERE {column} = ?1;"
        ),
        params![grouping_id],
        |row| {
            Ok(ParameterAverages {
                wind: row.get(0)?,
                humidity: row.get(1)?,
                pressure: row.get(2)?,
                temperature: row.get(3)?,
                precipitation: row.get(4)?,
                altitude: row.get(5)?,
                glacier_mass: row.get(6)?,
            })
        },
    )?;

    let detail_sql = if kind.joins_operator() {
        format!(
            "SELECT
                o.observed_on,
                o.wind,
                o.humidity,
                o.pressure,
                o.temperature,
                o.precipitation,
                o.altitude,
                o.glacier_mass,
                o.note,
                op.first_name AS operator_first_name,
                op.last_name AS operator_last_name
             FROM observations o
             JOIN monitoring_centers c ON o.center_id = c.id
             JOIN operators op ON c.operator_id = op.id
             WHERE o.{column} = ?1
             ORDER BY o.observed_on DESC, o.id DESC;"
        )
    } else {
        format!(
            "SELECT
                o.observed_on,
                o.wind,
                o.humidity,
                o.pressure,
                o.temperature,
                o.precipitation,
                o.altitude,
                o.glacier_mass,
                o.note,
                NULL AS operator_first_name,
                NULL AS operator_last_name
             FROM observations o
             WHERE o.{column} = ?1
             ORDER BY o.observed_on DESC, o.id DESC;"
        )
    };

    let mut stmt = conn.prepare(&detail_sql)?;
    let mut rows = stmt.query(params![grouping_id])?;
    let mut details = Vec::new();
    while let Some(row) = rows.next()? {
        details.push(parse_detail_row(row)?);
    }

    Ok(Summary {
        observation_count,
        averages: Some(averages),
        details,
    })
}

/// Fetches up to `limit` most recent non-blank remarks for `grouping_id`.
pub fn recent_remarks(
    conn: &Connection,
    grouping_id: i64,
    kind: GroupingKind,
    limit: u32,
) -> RepoResult<Vec<Remark>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let column = kind.filter_column();
    let mut stmt = conn.prepare(&format!(
        "SELECT observed_on, note
         FROM observations
         WHERE {column} = ?1 AND note IS NOT NULL AND TRIM(note) <> ''
         ORDER BY observed_on DESC, id DESC
         LIMIT ?2;"
    ))?;
    let mut rows = stmt.query(params![grouping_id, limit])?;

    let mut remarks = Vec::new();
    while let Some(row) = rows.next()? {
        remarks.push(Remark {
            observed_on: row.get(0)?,
            note: row.get(1)?,
        });
    }
    Ok(remarks)
}

fn parse_detail_row(row: &Row<'_>) -> RepoResult<ObservationDetail> {
    let operator = match row.get::<_, Option<String>>("operator_first_name")? {
        Some(first_name) => Some(OperatorName {
            first_name,
            last_name: row
                .get::<_, Option<String>>("operator_last_name")?
                .unwrap_or_default(),
        }),
        None => None,
    };

    Ok(ObservationDetail {
        operator,
        observed_on: row.get("observed_on")?,
        measurements: Measurements {
            wind: row.get("wind")?,
            humidity: row.get("humidity")?,
            pressure: row.get("pressure")?,
            temperature: row.get("temperature")?,
            precipitation: row.get("precipitation")?,
            altitude: row.get("altitude")?,
            glacier_mass: row.get("glacier_mass")?,
        },
        note: row.get("note")?,
    })
}
