//! The execution seam: hand a descriptor to the database, get rows back.

use std::future::Future;

use async_trait::async_trait;
use chrono::NaiveDate;
use query_engine_sql::sql::execution_plan::QueryDescriptor;
use query_engine_sql::sql::string::Param;
use sqlx::database::HasArguments;
use tracing::{info_span, Instrument};

use crate::error::Error;
use crate::metrics::Metrics;

/// The rows type a [`QueryExecutor`] decodes from.
pub type DatabaseRow<E> = <<E as QueryExecutor>::Database as sqlx::Database>::Row;

/// What a write statement did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementOutcome {
    pub rows_affected: u64,
    /// The id generated by the last INSERT on the connection.
    pub last_insert_id: Option<i64>,
}

/// Executes descriptors. Implementations must be safe to share between
/// concurrent requests; a descriptor may be executed any number of times.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    type Database: sqlx::Database;

    /// Run a query and decode every row.
    async fn fetch_all<T>(&self, descriptor: &QueryDescriptor) -> Result<Vec<T>, Error>
    where
        T: for<'r> sqlx::FromRow<'r, <Self::Database as sqlx::Database>::Row> + Send + Unpin;

    /// Run an INSERT, UPDATE or DELETE.
    async fn execute_statement(&self, descriptor: &QueryDescriptor)
        -> Result<StatementOutcome, Error>;
}

/// Bind the values of a descriptor in order.
pub(crate) fn bind_params<'q, DB>(
    query: sqlx::query::Query<'q, DB, <DB as HasArguments<'q>>::Arguments>,
    params: &[Param],
) -> sqlx::query::Query<'q, DB, <DB as HasArguments<'q>>::Arguments>
where
    DB: sqlx::Database,
    String: sqlx::Encode<'q, DB> + sqlx::Type<DB>,
    i64: sqlx::Encode<'q, DB> + sqlx::Type<DB>,
    f64: sqlx::Encode<'q, DB> + sqlx::Type<DB>,
    NaiveDate: sqlx::Encode<'q, DB> + sqlx::Type<DB>,
{
    params.iter().fold(query, |query, param| match param {
        Param::String(s) => query.bind(s.clone()),
        Param::Integer(i) => query.bind(*i),
        Param::Float(f) => query.bind(*f),
        Param::Date(d) => query.bind(*d),
    })
}

/// Time a round trip, count its outcome and log it.
pub(crate) async fn observe<T, F>(
    metrics: &Metrics,
    descriptor: &QueryDescriptor,
    round_trip: F,
) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    let timer = metrics.query_duration_seconds.start_timer();
    let result = round_trip
        .instrument(info_span!(
            "Execute query",
            template = descriptor.template(),
            values = ?descriptor.values(),
        ))
        .await;
    timer.observe_duration();

    match &result {
        Ok(_) => {
            metrics.query_total.inc();
            tracing::info!(template = descriptor.template(), "query succeeded");
        }
        Err(err) => {
            metrics.query_failure_total.inc();
            tracing::error!(
                template = descriptor.template(),
                error = %err,
                "query failed"
            );
        }
    }
    result
}
