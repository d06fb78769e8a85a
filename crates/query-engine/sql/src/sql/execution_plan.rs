//! The unit handed to the execution collaborator.

use super::ast;
use super::string::{Param, SQL};

/// A rendered statement: a template with positional placeholders and the
/// ordered values bound to them.
///
/// A descriptor can only be produced by rendering an AST, so the number of
/// placeholders always equals the number of values. It is never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    template: String,
    values: Vec<Param>,
}

impl QueryDescriptor {
    /// Render a statement.
    pub fn new(statement: &ast::Statement) -> QueryDescriptor {
        let mut sql = SQL::new();
        statement.to_sql(&mut sql);
        QueryDescriptor {
            template: sql.sql,
            values: sql.params,
        }
    }

    /// Render a SELECT statement.
    pub fn select(select: ast::Select) -> QueryDescriptor {
        Self::new(&ast::Statement::Select(Box::new(select)))
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn values(&self) -> &[Param] {
        &self.values
    }

    /// The template laid out for human eyes, for logging and debugging.
    pub fn pretty_template(&self) -> String {
        sqlformat::format(
            &self.template,
            &sqlformat::QueryParams::None,
            sqlformat::FormatOptions::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::helpers;

    fn room_select() -> ast::Select {
        let table = ast::TableReference::DBTable {
            schema: None,
            table: ast::TableName("room".to_string()),
        };
        let alias = helpers::make_table_alias("room".to_string());
        let room = helpers::aliased_table(&alias);
        let mut select = helpers::star_select(ast::From::Table {
            reference: table,
            alias,
        });
        select.where_ = ast::Where(helpers::and_all(vec![
            helpers::equals(
                helpers::table_column(&room, "hotel_id"),
                ast::Expression::Value(ast::Value::Int8(5)),
            ),
            helpers::binary(
                helpers::table_column(&room, "price"),
                ast::BinaryOperator::LessThanOrEqualTo,
                ast::Expression::Value(ast::Value::Float8(120.5)),
            ),
        ]));
        select.limit = ast::Limit {
            limit: Some(10),
            offset: Some(20),
        };
        select
    }

    #[test]
    fn descriptor_keeps_values_in_template_order() {
        let descriptor = QueryDescriptor::select(room_select());

        insta::assert_snapshot!(
            descriptor.template(),
            @"SELECT * FROM `room` AS `room` WHERE ((`room`.`hotel_id` = ?) AND (`room`.`price` <= ?)) LIMIT ? OFFSET ?"
        );
        similar_asserts::assert_eq!(
            descriptor.values(),
            &[
                Param::Integer(5),
                Param::Float(120.5),
                Param::Integer(10),
                Param::Integer(20),
            ]
        );
    }

    #[test]
    fn pretty_template_only_changes_layout() {
        let descriptor = QueryDescriptor::select(room_select());
        let pretty = descriptor.pretty_template();
        let squeeze = |text: &str| text.split_whitespace().collect::<String>();

        assert!(pretty.lines().count() > 1);
        similar_asserts::assert_eq!(squeeze(&pretty), squeeze(descriptor.template()));
        assert_eq!(pretty.matches('?').count(), descriptor.values().len());
    }
}
