//! Transient state shared by every operation.
//!
//! This is initialized on startup.

use std::time::Duration;

use query_engine_execution::metrics;
use query_engine_execution::mysql::MySqlExecutor;
use query_engine_execution::sqlite::SqliteExecutor;
use query_engine_translation::translation::helpers::Env;
use reservations_configuration::{Configuration, PoolSettings};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::pool::PoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info_span, Instrument};

use crate::error::InitializationError;

/// The translation environment and the executor to run descriptors with.
#[derive(Debug, Clone)]
pub struct State<E> {
    pub env: Env,
    pub executor: E,
}

impl<E> State<E> {
    pub fn new(configuration: &Configuration, executor: E) -> State<E> {
        State {
            env: Env::new(
                configuration.schema.clone(),
                configuration.default_results_per_page,
            ),
            executor,
        }
    }
}

fn pool_options<DB: sqlx::Database>(settings: &PoolSettings) -> PoolOptions<DB> {
    PoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.pool_timeout))
        .idle_timeout(settings.idle_timeout.map(Duration::from_secs))
        .max_lifetime(settings.connection_lifetime.map(Duration::from_secs))
}

async fn setup_metrics(
    metrics_registry: &prometheus::Registry,
) -> Result<metrics::Metrics, InitializationError> {
    async { metrics::initialise_metrics(metrics_registry).map_err(InitializationError::MetricsError) }
        .instrument(info_span!("Setup metrics"))
        .await
}

/// Create a MySQL connection pool and wrap it inside a State.
pub async fn create_mysql_state(
    configuration: &Configuration,
    metrics_registry: &prometheus::Registry,
) -> Result<State<MySqlExecutor>, InitializationError> {
    let options: MySqlPoolOptions = pool_options(&configuration.pool_settings);
    let pool = options
        .connect(&configuration.connection_uri)
        .instrument(info_span!("Create connection pool"))
        .await
        .map_err(InitializationError::UnableToCreatePool)?;
    let metrics = setup_metrics(metrics_registry).await?;
    Ok(State::new(configuration, MySqlExecutor::new(pool, metrics)))
}

/// Create a SQLite connection pool and wrap it inside a State.
pub async fn create_sqlite_state(
    configuration: &Configuration,
    metrics_registry: &prometheus::Registry,
) -> Result<State<SqliteExecutor>, InitializationError> {
    let options: SqlitePoolOptions = pool_options(&configuration.pool_settings);
    let pool = options
        .connect(&configuration.connection_uri)
        .instrument(info_span!("Create connection pool"))
        .await
        .map_err(InitializationError::UnableToCreatePool)?;
    let metrics = setup_metrics(metrics_registry).await?;
    Ok(State::new(configuration, SqliteExecutor::new(pool, metrics)))
}
