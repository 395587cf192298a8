//! Observation aggregation and report rendering.
//!
//! # Responsibility
//! - Compute counts, averages, chronological detail and recent remarks over
//!   observations for one grouping key.
//! - Render the human-readable report blocks returned by the facade.
//!
//! # Invariants
//! - All three grouping kinds flow through one parameterized query path.
//! - Zero matching observations short-circuits to the "no data" outcome
//!   without computing averages.

pub mod render;
pub mod summary;
