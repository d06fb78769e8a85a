use thiserror::Error;

use query_engine_execution::error::Error as ExecutionError;
use query_engine_translation::translation::error::Error as TranslationError;

/// Why an operation failed. Translation errors are raised before anything
/// reaches the database.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid request: {0}")]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(sqlx::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
