//! In-memory user store
//!
//! Insertion order is preserved; usernames are not unique; bulk delete
//! destroys the whole set. Durability beyond process lifetime is the
//! storage collaborator's concern, not this store's.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::Serialize;

use super::errors::{UserError, UserResult};
use super::model::UserRecord;

/// How many countries the stats aggregate reports
const TOP_COUNTRIES: usize = 3;

/// Aggregate view over the user set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Number of stored users
    pub count: usize,
    /// Mean age rounded to two decimals; 0.0 for an empty set
    pub average_age: f64,
    /// Up to three most frequent countries, count descending then name
    /// ascending
    pub top_countries: Vec<CountryCount>,
}

/// One country's share of the user set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub users: usize,
}

/// Thread-safe in-memory user record set
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated record
    pub fn insert(&self, user: UserRecord) -> UserResult<()> {
        let mut users = self.write_guard()?;
        users.push(user);
        Ok(())
    }

    /// All records in insertion order
    pub fn list(&self) -> UserResult<Vec<UserRecord>> {
        let users = self.read_guard()?;
        Ok(users.clone())
    }

    /// Number of stored records
    pub fn len(&self) -> UserResult<usize> {
        let users = self.read_guard()?;
        Ok(users.len())
    }

    /// Returns true when the store holds no records
    pub fn is_empty(&self) -> UserResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove every record, returning how many were removed
    pub fn delete_all(&self) -> UserResult<usize> {
        let mut users = self.write_guard()?;
        let removed = users.len();
        users.clear();
        Ok(removed)
    }

    /// Compute the stats aggregate
    pub fn stats(&self) -> UserResult<UserStats> {
        let users = self.read_guard()?;

        let count = users.len();
        let average_age = if count == 0 {
            0.0
        } else {
            let sum: u64 = users.iter().map(|u| u64::from(u.age)).sum();
            round2(sum as f64 / count as f64)
        };

        let mut by_country: BTreeMap<&str, usize> = BTreeMap::new();
        for user in users.iter() {
            *by_country.entry(user.country.as_str()).or_insert(0) += 1;
        }

        let mut top_countries: Vec<CountryCount> = by_country
            .into_iter()
            .map(|(country, users)| CountryCount {
                country: country.to_string(),
                users,
            })
            .collect();
        top_countries.sort_by(|a, b| b.users.cmp(&a.users).then(a.country.cmp(&b.country)));
        top_countries.truncate(TOP_COUNTRIES);

        Ok(UserStats {
            count,
            average_age,
            top_countries,
        })
    }

    fn read_guard(&self) -> UserResult<std::sync::RwLockReadGuard<'_, Vec<UserRecord>>> {
        self.users
            .read()
            .map_err(|_| UserError::Storage("Lock poisoned".to_string()))
    }

    fn write_guard(&self) -> UserResult<std::sync::RwLockWriteGuard<'_, Vec<UserRecord>>> {
        self.users
            .write()
            .map_err(|_| UserError::Storage("Lock poisoned".to_string()))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
