//! 谓词
//!
//! 搜索型 CASE、聚合 FILTER 子句和子查询 WHERE 所需的最小谓词结构。
//! 这里只承载结构，求值不在本层。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::def::Expression;

/// 比较运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOperator::Eq => "=",
            CompareOperator::Ne => "<>",
            CompareOperator::Lt => "<",
            CompareOperator::Le => "<=",
            CompareOperator::Gt => ">",
            CompareOperator::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 复合谓词运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundOperator {
    And,
    Or,
}

impl fmt::Display for CompoundOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompoundOperator::And => f.write_str("AND"),
            CompoundOperator::Or => f.write_str("OR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompareCriteria {
    pub left: Expression,
    pub operator: CompareOperator,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsNullCriteria {
    pub expression: Expression,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundCriteria {
    pub operator: CompoundOperator,
    pub criteria: Vec<Criteria>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotCriteria {
    pub criteria: Box<Criteria>,
}

/// 布尔表达式直接作为谓词
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpressionCriteria {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Criteria {
    Compare(CompareCriteria),
    IsNull(IsNullCriteria),
    Compound(CompoundCriteria),
    Not(NotCriteria),
    Expression(ExpressionCriteria),
}

impl Criteria {
    pub fn compare(left: Expression, operator: CompareOperator, right: Expression) -> Self {
        Criteria::Compare(CompareCriteria {
            left,
            operator,
            right,
        })
    }

    pub fn is_null(expression: Expression) -> Self {
        Criteria::IsNull(IsNullCriteria {
            expression,
            negated: false,
        })
    }

    pub fn is_not_null(expression: Expression) -> Self {
        Criteria::IsNull(IsNullCriteria {
            expression,
            negated: true,
        })
    }

    pub fn and(criteria: Vec<Criteria>) -> Self {
        Criteria::Compound(CompoundCriteria {
            operator: CompoundOperator::And,
            criteria,
        })
    }

    pub fn or(criteria: Vec<Criteria>) -> Self {
        Criteria::Compound(CompoundCriteria {
            operator: CompoundOperator::Or,
            criteria,
        })
    }

    pub fn negate(criteria: Criteria) -> Self {
        Criteria::Not(NotCriteria {
            criteria: Box::new(criteria),
        })
    }

    pub fn expression(expression: Expression) -> Self {
        Criteria::Expression(ExpressionCriteria { expression })
    }
}
