//! Execution against a SQLite connection pool.

use async_trait::async_trait;
use query_engine_sql::sql::execution_plan::QueryDescriptor;
use sqlx::sqlite::{Sqlite, SqlitePool};

use crate::error::Error;
use crate::metrics::Metrics;
use crate::query::{bind_params, observe, QueryExecutor, StatementOutcome};

#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    pool: SqlitePool,
    metrics: Metrics,
}

impl SqliteExecutor {
    pub fn new(pool: SqlitePool, metrics: Metrics) -> SqliteExecutor {
        SqliteExecutor { pool, metrics }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    type Database = Sqlite;

    async fn fetch_all<T>(&self, descriptor: &QueryDescriptor) -> Result<Vec<T>, Error>
    where
        T: for<'r> sqlx::FromRow<'r, <Self::Database as sqlx::Database>::Row> + Send + Unpin,
    {
        observe(&self.metrics, descriptor, async {
            let rows = bind_params(sqlx::query::<Sqlite>(descriptor.template()), descriptor.values())
                .fetch_all(&self.pool)
                .await?;
            rows.iter()
                .map(|row| T::from_row(row))
                .collect::<Result<Vec<T>, _>>()
                .map_err(Error::Decode)
        })
        .await
    }

    async fn execute_statement(
        &self,
        descriptor: &QueryDescriptor,
    ) -> Result<StatementOutcome, Error> {
        observe(&self.metrics, descriptor, async {
            let result = bind_params(sqlx::query::<Sqlite>(descriptor.template()), descriptor.values())
                .execute(&self.pool)
                .await?;
            Ok(StatementOutcome {
                rows_affected: result.rows_affected(),
                last_insert_id: Some(result.last_insert_rowid()),
            })
        })
        .await
    }
}
