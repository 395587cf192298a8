//! Use-case facade over repositories and aggregation.
//!
//! # Responsibility
//! - Expose the synchronous call surface consumed by the transport layer.
//! - Keep callers decoupled from SQL and rendering details.

pub mod climate_service;
