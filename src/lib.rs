//! delayline - an HTTP query service over transportation delay records
//!
//! Loads a columnar CSV dataset of delay incidents, normalizes it into a
//! canonical in-memory table, and answers exact-match filter, count, and
//! pagination queries over HTTP in two encodings (JSON records and CSV).
//! A secondary in-memory user record set rides along with registration,
//! listing, bulk delete, and a stats aggregate.

pub mod cli;
pub mod encode;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod schema;
pub mod store;
pub mod users;
