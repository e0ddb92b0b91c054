//! 表达式字符串表示
//!
//! 节点本身不定义文本格式，`Display` 全部交给 SQL 文本渲染访问者。

use std::fmt;

use super::criteria::Criteria;
use super::def::Expression;
use super::{GroupSymbol, OrderBy, Query};
use crate::query::visitor::SqlStringVisitor;

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SqlStringVisitor::get_sql_string(self))
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SqlStringVisitor::get_sql_string(self))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SqlStringVisitor::get_sql_string(self))
    }
}

impl fmt::Display for GroupSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SqlStringVisitor::get_sql_string(self))
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SqlStringVisitor::get_sql_string(self))
    }
}
