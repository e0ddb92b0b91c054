//! SqlSymbol - typed expression and symbol model for a SQL query engine
//!
//! This crate provides the node family a SQL engine's parser, resolver, planner
//! and renderer share: symbols, constants, functions, aggregates, CASE
//! expressions, references, scalar subqueries and the SQL/XML constructs,
//! together with the visitor protocol every external pass is written against.

pub mod config;
pub mod core;
pub mod query;
pub mod utils;

// 错误和结果类型
pub use crate::core::error::{ExpressionError, ExpressionErrorType, ExpressionResult};

// 表达式系统类型
pub use crate::core::types::expression::{Expression, LanguageVisitor, Typed};
pub use crate::core::types::DataType;
pub use crate::core::value::Value;
