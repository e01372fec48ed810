//! # User Errors
//!
//! Error types for the user record set.

use std::fmt;

use thiserror::Error;

/// Result type for user operations
pub type UserResult<T> = Result<T, UserError>;

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Offending field name
    pub field: &'static str,
    /// What the field must satisfy
    pub reason: &'static str,
}

impl Violation {
    pub fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Errors raised by the user record set
#[derive(Debug, Clone, Error)]
pub enum UserError {
    /// The submitted record violates one or more field rules
    #[error("Invalid user: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    /// The in-memory store is unusable
    #[error("User storage error: {0}")]
    Storage(String),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
