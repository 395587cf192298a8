//! Domain records for the climate monitoring engine.
//!
//! # Responsibility
//! - Define canonical data structures shared by repositories, aggregation and
//!   the service facade.
//! - Keep one geographic read model for both point categories.
//!
//! # Invariants
//! - Every record is identified by a stable integer id assigned by the store.
//! - Observations are append-only and validated before persistence.

pub mod center;
pub mod geo_point;
pub mod observation;
pub mod operator;
