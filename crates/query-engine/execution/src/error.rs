//! Errors for query execution.

use thiserror::Error;

/// Execution failures are passed through from the database unmodified.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
    #[error("Unable to decode row: {0}")]
    Decode(#[source] sqlx::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Error {
        Error::Database(err)
    }
}
