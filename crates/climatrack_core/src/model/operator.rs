//! Registered operator domain model.
//!
//! # Responsibility
//! - Represent operator accounts and the registration request shape.
//! - Validate the national id format before persistence.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Italian fiscal code shape: 6 letters, 2 digits, month letter, 2 digits,
// 1 letter, 3 digits, 1 letter.
static NATIONAL_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[A-Z]{6}[0-9]{2}[ABCDEHLMPRST][0-9]{2}[A-Z][0-9]{3}[A-Z]$")
        .expect("national id pattern is a valid regex")
});

/// One registered field operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub email: String,
    pub login_id: String,
    pub credential: String,
}

/// Request model for operator registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOperator {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub email: String,
    pub login_id: String,
    pub credential: String,
}

/// Returns whether `value` matches the national id format.
pub fn is_valid_national_id(value: &str) -> bool {
    NATIONAL_ID_PATTERN.is_match(value)
}
