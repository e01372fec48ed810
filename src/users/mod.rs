//! User record set for delayline
//!
//! A secondary, independent record set: validated insertion, full-scan
//! listing, bulk delete, and a small stats aggregate. In-memory only.

mod errors;
mod model;
mod store;

pub use errors::{UserError, UserResult, Violation};
pub use model::{NewUser, UserRecord};
pub use store::{CountryCount, UserStats, UserStore};
