//! Helpers for processing requests and building SQL.

use query_engine_sql::sql;

/// Tables of the reservation schema. Names are an external contract.
pub mod tables {
    pub const BOOKING: &str = "booking";
    pub const GUEST: &str = "guest";
    pub const HOTEL: &str = "hotel";
    pub const HOTEL_IMAGE: &str = "hotel_image";
    pub const REWARD: &str = "reward";
    pub const REWARD_REASON: &str = "reward_reason";
    pub const ROOM: &str = "room";
    pub const ROOM_IMAGE: &str = "room_image";
    pub const TRANSACTION: &str = "transaction";
    pub const TRANSACTION_ROOM: &str = "transaction_room";
    pub const USER: &str = "user";
}

/// The status value that marks a booking as cancelled.
pub const CANCELLED_STATUS: &str = "cancelled";

/// Default page size when a request does not ask for one.
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 10;

/// Static information shared by every translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    schema: Option<sql::ast::SchemaName>,
    default_results_per_page: u32,
}

impl Default for Env {
    fn default() -> Self {
        Env {
            schema: None,
            default_results_per_page: DEFAULT_RESULTS_PER_PAGE,
        }
    }
}

/// A table in the FROM position together with the alias-based reference
/// used to address its columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableNameAndReference {
    pub from: sql::ast::From,
    pub reference: sql::ast::TableReference,
}

impl Env {
    /// Create a new Env. Tables are qualified by `schema` when one is given.
    pub fn new(schema: Option<String>, default_results_per_page: u32) -> Env {
        Env {
            schema: schema.map(sql::ast::SchemaName),
            default_results_per_page,
        }
    }

    pub fn default_results_per_page(&self) -> u32 {
        self.default_results_per_page
    }

    /// A reference to a table of the reservation schema.
    pub fn table(&self, name: &str) -> sql::ast::TableReference {
        sql::ast::TableReference::DBTable {
            schema: self.schema.clone(),
            table: sql::ast::TableName(name.to_string()),
        }
    }

    /// Select from a table of the reservation schema under an alias.
    pub fn aliased_table(&self, name: &str, alias: &str) -> TableNameAndReference {
        let alias = sql::helpers::make_table_alias(alias.to_string());
        TableNameAndReference {
            reference: sql::helpers::aliased_table(&alias),
            from: sql::ast::From::Table {
                reference: self.table(name),
                alias,
            },
        }
    }
}

/// Select from a subquery under an alias.
pub fn aliased_select(select: sql::ast::Select, alias: &str) -> TableNameAndReference {
    let alias = sql::helpers::make_table_alias(alias.to_string());
    TableNameAndReference {
        reference: sql::helpers::aliased_table(&alias),
        from: sql::ast::From::Select {
            select: Box::new(select),
            alias,
        },
    }
}

/// A column selected under its own name.
pub fn same_name_column(
    table: &sql::ast::TableReference,
    name: &str,
) -> (sql::ast::ColumnAlias, sql::ast::Expression) {
    sql::helpers::make_column(
        table.clone(),
        sql::ast::ColumnName(name.to_string()),
        sql::helpers::make_column_alias(name.to_string()),
    )
}

/// Log a freshly built descriptor.
pub(crate) fn trace_descriptor(operation: &str, descriptor: &sql::execution_plan::QueryDescriptor) {
    tracing::debug!(
        operation,
        template = %descriptor.pretty_template(),
        values = ?descriptor.values(),
        "composed query"
    );
}
