//! Type definitions of a low-level SQL string representation.

use chrono::NaiveDate;

/// A SQL template under construction together with its bound parameters.
///
/// Every call to `append_param` writes exactly one placeholder and pushes
/// exactly one parameter, so the two can never drift apart.
#[derive(Debug, PartialEq)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Param>,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

/// A parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A literal string
    String(String),
    /// A whole number
    Integer(i64),
    /// A fractional number
    Float(f64),
    /// A calendar date
    Date(NaiveDate),
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Param::String(s) => write!(f, "'{s}'"),
            Param::Integer(i) => write!(f, "{i}"),
            Param::Float(n) => write!(f, "{n}"),
            Param::Date(d) => write!(f, "'{}'", d.format("%Y-%m-%d")),
        }
    }
}

/// The marker written for each positional parameter.
pub const PLACEHOLDER: &str = "?";

impl SQL {
    pub fn new() -> SQL {
        SQL {
            sql: String::new(),
            params: vec![],
        }
    }
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }
    /// Append a back-tick quoted identifier. Embedded back-ticks are doubled.
    pub fn append_identifier(&mut self, sql: &str) {
        self.sql.push('`');
        self.sql.push_str(&sql.replace('`', "``"));
        self.sql.push('`');
    }
    pub fn append_param(&mut self, param: Param) {
        self.sql.push_str(PLACEHOLDER);
        self.params.push(param);
    }
}
