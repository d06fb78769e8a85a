//! Describe the SQL AST, how to build it, and how to render it.

pub mod ast;
pub mod convert;
pub mod execution_plan;
pub mod helpers;
pub mod string;
