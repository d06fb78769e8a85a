//! Hotel search, availability and booking operations over a MySQL or SQLite
//! database.
//!
//! Every operation composes a descriptor, hands it to the executor of a
//! [`state::State`] once and decodes the rows. Nothing is retried and
//! partial results are never returned.

pub mod error;
pub mod mutations;
pub mod queries;
pub mod records;
pub mod state;

pub use error::Error;
pub use state::State;
