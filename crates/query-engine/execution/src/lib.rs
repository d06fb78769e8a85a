//! Run query descriptors against a MySQL or SQLite database.
//!
//! Descriptors are executed as prepared statements: the template is sent as
//! is and the values are bound positionally.

pub mod error;
pub mod metrics;
pub mod mysql;
pub mod query;
pub mod sqlite;
