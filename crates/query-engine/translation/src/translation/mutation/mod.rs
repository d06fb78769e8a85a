//! Translate writes into INSERT, UPDATE and DELETE descriptors.

pub mod accounts;
pub mod booking;
pub mod rewards;

use nonempty::NonEmpty;
use query_engine_sql::sql;
use query_engine_sql::sql::execution_plan::QueryDescriptor;

use crate::translation::helpers::Env;

/// `INSERT INTO <table> (<columns>) VALUES (...), ...`. Each row must have
/// one expression per column.
pub(crate) fn insert(
    env: &Env,
    table: &str,
    columns: &[&str],
    rows: NonEmpty<Vec<sql::ast::Expression>>,
) -> QueryDescriptor {
    debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
    QueryDescriptor::new(&sql::ast::Statement::Insert(sql::ast::Insert {
        table: env.table(table),
        columns: columns
            .iter()
            .map(|name| sql::ast::ColumnName(name.to_string()))
            .collect(),
        from: sql::ast::InsertFrom::Values(rows),
    }))
}

/// `UPDATE <table> SET ... WHERE <key> = ?`
pub(crate) fn update_by_key(
    env: &Env,
    table: &str,
    set: Vec<(&str, sql::ast::Expression)>,
    key: &str,
    id: i64,
) -> QueryDescriptor {
    QueryDescriptor::new(&sql::ast::Statement::Update(sql::ast::Update {
        table: env.table(table),
        set: set
            .into_iter()
            .map(|(name, value)| (sql::ast::ColumnName(name.to_string()), value))
            .collect(),
        where_: sql::ast::Where(key_equals(key, id)),
    }))
}

/// `DELETE FROM <table> WHERE <key> = ?`
pub(crate) fn delete_by_key(env: &Env, table: &str, key: &str, id: i64) -> QueryDescriptor {
    QueryDescriptor::new(&sql::ast::Statement::Delete(sql::ast::Delete {
        table: env.table(table),
        where_: sql::ast::Where(key_equals(key, id)),
    }))
}

fn key_equals(key: &str, id: i64) -> sql::ast::Expression {
    sql::helpers::equals(sql::helpers::bare_column(key), int(id))
}

// Values //

pub(crate) fn int(value: i64) -> sql::ast::Expression {
    sql::ast::Expression::Value(sql::ast::Value::Int8(value))
}

pub(crate) fn float(value: f64) -> sql::ast::Expression {
    sql::ast::Expression::Value(sql::ast::Value::Float8(value))
}

pub(crate) fn text(value: &str) -> sql::ast::Expression {
    sql::ast::Expression::Value(sql::ast::Value::String(value.to_string()))
}

pub(crate) fn date(value: chrono::NaiveDate) -> sql::ast::Expression {
    sql::ast::Expression::Value(sql::ast::Value::Date(value))
}

pub(crate) fn optional_int(value: Option<i64>) -> sql::ast::Expression {
    value.map_or(sql::ast::Expression::Value(sql::ast::Value::Null), int)
}

pub(crate) fn optional_text(value: Option<&str>) -> sql::ast::Expression {
    value.map_or(sql::ast::Expression::Value(sql::ast::Value::Null), text)
}
