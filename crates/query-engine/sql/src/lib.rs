//! A dialect-neutral SQL AST and its rendering into positional query descriptors.

pub mod sql;
