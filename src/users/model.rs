//! User record model
//!
//! The secondary record set is independent of the incident table: its own
//! fields, its own validation, no schema registry involved. Records are
//! validated before insertion; the store never holds a half-checked row.

use serde::{Deserialize, Serialize};

use super::errors::{UserError, UserResult, Violation};

/// A validated user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name, non-empty
    pub username: String,
    /// Age in years, strictly positive
    pub age: u32,
    /// Country name, non-empty
    pub country: String,
}

/// An unvalidated submission from the wire.
///
/// Every field is optional at this stage so that missing keys surface as
/// field violations instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
}

impl NewUser {
    /// Validate the submission into a `UserRecord`.
    ///
    /// Collects every violation instead of stopping at the first.
    pub fn validate(self) -> UserResult<UserRecord> {
        let mut violations = Vec::new();

        let username = match self.username {
            Some(name) if !name.trim().is_empty() => Some(name),
            Some(_) => {
                violations.push(Violation::new("username", "must not be empty"));
                None
            }
            None => {
                violations.push(Violation::new("username", "is required"));
                None
            }
        };

        let age = match self.age {
            Some(age) if age > 0 && age <= u32::MAX as i64 => Some(age as u32),
            Some(_) => {
                violations.push(Violation::new("age", "must be a positive integer"));
                None
            }
            None => {
                violations.push(Violation::new("age", "is required"));
                None
            }
        };

        let country = match self.country {
            Some(country) if !country.trim().is_empty() => Some(country),
            Some(_) => {
                violations.push(Violation::new("country", "must not be empty"));
                None
            }
            None => {
                violations.push(Violation::new("country", "is required"));
                None
            }
        };

        match (username, age, country) {
            (Some(username), Some(age), Some(country)) => Ok(UserRecord {
                username,
                age,
                country,
            }),
            _ => Err(UserError::Validation(violations)),
        }
    }
}
