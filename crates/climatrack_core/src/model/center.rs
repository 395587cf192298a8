//! Monitoring center domain model.
//!
//! # Invariants
//! - A center is owned by exactly one operator, and an operator owns at most
//!   one center; the relation never changes after creation.

use serde::{Deserialize, Serialize};

/// Administrative entity under which points of interest and observations are
/// organized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringCenter {
    pub id: i64,
    pub operator_id: i64,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub province: String,
}

/// Request model for creating a monitoring center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCenter {
    pub operator_id: i64,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub province: String,
}
