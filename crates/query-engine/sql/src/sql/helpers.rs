//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WITH` clause.
pub fn empty_with() -> With {
    With {
        common_table_expressions: vec![],
    }
}

/// An empty `WHERE` clause.
pub fn empty_where() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// An empty `GROUP BY` clause.
pub fn empty_group_by() -> GroupBy {
    GroupBy { elements: vec![] }
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// Empty `LIMIT` and `OFFSET` clauses.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

/// A `true` expression.
pub fn true_expr() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// A `false` expression.
pub fn false_expr() -> Expression {
    Expression::Value(Value::Bool(false))
}

// Aliasing //

/// Create column aliases using this function so we build everything in one place.
pub fn make_column_alias(name: String) -> ColumnAlias {
    ColumnAlias { name }
}

/// Create table aliases using this function so we build everything in one place.
pub fn make_table_alias(name: String) -> TableAlias {
    TableAlias { name }
}

/// Refer to a table we have aliased.
pub fn aliased_table(alias: &TableAlias) -> TableReference {
    TableReference::AliasedTable(alias.clone())
}

/// Generate a column expression refering to a specific table.
pub fn make_column(
    table: TableReference,
    name: ColumnName,
    alias: ColumnAlias,
) -> (ColumnAlias, Expression) {
    (
        alias,
        Expression::ColumnReference(ColumnReference::TableColumn { table, name }),
    )
}

/// A column of a table, as an expression.
pub fn table_column(table: &TableReference, name: &str) -> Expression {
    Expression::ColumnReference(ColumnReference::TableColumn {
        table: table.clone(),
        name: ColumnName(name.to_string()),
    })
}

/// A column that needs no table qualifier.
pub fn bare_column(name: &str) -> Expression {
    Expression::ColumnReference(ColumnReference::BareColumn(ColumnName(name.to_string())))
}

// Predicates //

/// `left <operator> right`
pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

/// `left = right`
pub fn equals(left: Expression, right: Expression) -> Expression {
    binary(left, BinaryOperator::Equals, right)
}

/// `NOT expression`
pub fn not(expression: Expression) -> Expression {
    Expression::Not(Box::new(expression))
}

/// `expression` contains `needle` as a literal substring. LIKE wildcards in
/// the needle are escaped.
pub fn contains_text(expression: Expression, needle: &str) -> Expression {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    Expression::Like {
        expression: Box::new(expression),
        pattern: Box::new(Expression::Value(Value::String(pattern))),
    }
}

/// `EXISTS (select)`
pub fn exists(select: Select) -> Expression {
    Expression::Exists {
        select: Box::new(select),
    }
}

/// Conjunction of every expression. An empty list is `true`.
pub fn and_all(expressions: impl IntoIterator<Item = Expression>) -> Expression {
    expressions
        .into_iter()
        .reduce(|left, right| Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        })
        .unwrap_or_else(true_expr)
}

/// Disjunction of every expression. An empty list is `false`.
pub fn or_all(expressions: impl IntoIterator<Item = Expression>) -> Expression {
    expressions
        .into_iter()
        .reduce(|left, right| Expression::Or {
            left: Box::new(left),
            right: Box::new(right),
        })
        .unwrap_or_else(false_expr)
}

/// A function call expression.
pub fn function(function: Function, args: Vec<Expression>) -> Expression {
    Expression::FunctionCall { function, args }
}

// SELECTs //

/// Build a simple select with a select list and the rest are empty.
pub fn simple_select(select_list: Vec<(ColumnAlias, Expression)>) -> Select {
    Select {
        with: empty_with(),
        distinct: false,
        select_list: SelectList::SelectList(select_list),
        from: None,
        joins: vec![],
        where_: Where(empty_where()),
        group_by: empty_group_by(),
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

/// Build a simple select *
pub fn star_select(from: From) -> Select {
    Select {
        with: empty_with(),
        distinct: false,
        select_list: SelectList::SelectStar,
        from: Some(from),
        joins: vec![],
        where_: Where(empty_where()),
        group_by: empty_group_by(),
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

/// Build a `SELECT 1 FROM ... WHERE ...`, the usual body of an EXISTS test.
pub fn select_one(from: From, predicate: Expression) -> Select {
    Select {
        select_list: SelectList::Select1,
        where_: Where(predicate),
        ..star_select(from)
    }
}
