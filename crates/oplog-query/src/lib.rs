// Query layer - translates operator intent into a single LogQL query string
// This layer sits between CLI argument parsing and the backend invocation

pub mod error;
pub mod filter;
pub mod query;
pub mod time;

pub use error::{Error, Result};
pub use filter::{ACCELERATOR_FIELD, FilterSet};
pub use query::{Clause, DEV_ACCELERATOR, DEV_JOB, PROD_JOB, QueryBuilder, QuerySpec};
pub use time::{duration_to_hours, normalize_date, normalize_date_at, normalize_lookback};
