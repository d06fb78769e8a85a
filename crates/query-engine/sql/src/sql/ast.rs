//! The statements the composers build, before rendering.

use chrono::NaiveDate;
use nonempty::NonEmpty;

/// A complete statement that can be rendered into a query descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Box<Select>),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

/// Common table expressions, rendered before the statement body.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    pub common_table_expressions: Vec<CommonTableExpression>,
}

/// `alias AS (select)`
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    pub alias: TableAlias,
    pub select: Box<Select>,
}

/// A SELECT clause
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub with: With,
    pub distinct: bool,
    pub select_list: SelectList,
    pub from: Option<From>,
    pub joins: Vec<Join>,
    pub where_: Where,
    pub group_by: GroupBy,
    pub order_by: OrderBy,
    pub limit: Limit,
}

/// An INSERT clause
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: TableReference,
    pub columns: Vec<ColumnName>,
    pub from: InsertFrom,
}

/// The rows an INSERT writes. A VALUES list always carries at least one row.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertFrom {
    Values(NonEmpty<Vec<Expression>>),
}

/// An UPDATE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: TableReference,
    pub set: Vec<(ColumnName, Expression)>,
    pub where_: Where,
}

/// A DELETE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: TableReference,
    pub where_: Where,
}

/// A select list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectList {
    SelectList(Vec<(ColumnAlias, Expression)>),
    SelectStar,
    SelectStarFrom(TableReference),
    Select1,
    SelectListComposite(Box<SelectList>, Box<SelectList>),
}

/// A FROM clause
#[derive(Debug, Clone, PartialEq)]
pub enum From {
    /// `reference AS alias`
    Table {
        reference: TableReference,
        alias: TableAlias,
    },
    /// `(select) AS alias`
    Select {
        select: Box<Select>,
        alias: TableAlias,
    },
}

/// A JOIN clause
#[derive(Debug, Clone, PartialEq)]
pub enum Join {
    /// INNER JOIN
    InnerJoin(InnerJoin),
    /// LEFT OUTER JOIN
    LeftOuterJoin(LeftOuterJoin),
}

/// An INNER JOIN clause
#[derive(Debug, Clone, PartialEq)]
pub struct InnerJoin {
    pub source: From,
    pub on: Expression,
}

/// Keeps every row of the left side.
#[derive(Debug, Clone, PartialEq)]
pub struct LeftOuterJoin {
    pub source: From,
    pub on: Expression,
}

/// A WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Where(pub Expression);

/// A GROUP BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    pub elements: Vec<Expression>,
}

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub target: Expression,
    pub direction: OrderByDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// LIMIT and OFFSET clauses. Both are bound as parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// A scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// AND clause
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// OR clause
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// NOT clause
    Not(Box<Expression>),
    /// `(left op right)`
    BinaryOperation {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    /// `(expression LIKE pattern ESCAPE '!')`
    Like {
        expression: Box<Expression>,
        pattern: Box<Expression>,
    },
    /// `(expression op)`
    UnaryOperation {
        expression: Box<Expression>,
        operator: UnaryOperator,
    },
    /// `FUNCTION(args, ...)`
    FunctionCall {
        function: Function,
        args: Vec<Expression>,
    },
    /// An EXISTS clause
    Exists { select: Box<Select> },
    /// A column reference
    ColumnReference(ColumnReference),
    /// An irreducible value
    Value(Value),
    /// A COUNT clause
    Count(CountType),
    /// The date at which the statement runs
    CurrentDate,
}

/// The character that makes the next `%`, `_` or `!` of a LIKE pattern
/// match literally. It needs no escaping inside a string literal in either
/// MySQL or SQLite.
pub const LIKE_ESCAPE: char = '!';

/// An unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    IsNotNull,
}

/// A binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
}

/// A scalar or aggregate function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Coalesce,
    GroupConcat,
    Lower,
    Max,
    Min,
    Sum,
}

/// COUNT clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountType {
    Star,
    Simple(ColumnReference),
    Distinct(ColumnReference),
}

/// Value
///
/// Caller-supplied values (numbers, strings and dates) are always rendered as
/// positional parameters. Booleans and NULL are rendered as syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int8(i64),
    Float8(f64),
    Bool(bool),
    String(String),
    Date(NaiveDate),
    Null,
}

/// Qualifies table names, e.g. a MySQL database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName(pub String);

/// A database table name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(pub String);

/// How a column or FROM clause names its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableReference {
    /// `schema.table`, or just `table`
    DBTable {
        schema: Option<SchemaName>,
        table: TableName,
    },
    /// an alias introduced by a FROM clause or CTE
    AliasedTable(TableAlias),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName(pub String);

/// A column as it appears in an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnReference {
    /// `table.column`
    TableColumn {
        table: TableReference,
        name: ColumnName,
    },
    /// an unqualified column, as found in SET lists and single-table statements
    BareColumn(ColumnName),
}

/// An alias given to a table or subquery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableAlias {
    pub name: String,
}

/// The output name of a select list entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnAlias {
    pub name: String,
}
