//! 聚合函数
//!
//! 聚合名称在构造时校验；结果类型按 `type_deduce` 中的提升表计算。

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::capability::Typed;
use super::criteria::Criteria;
use super::def::Expression;
use super::order_by::OrderBy;
use super::type_deduce::{lookup_promotion, AVG_TYPES, SUM_TYPES};
use crate::core::error::{ExpressionError, ExpressionResult};
use crate::core::types::DataType;

/// 允许的聚合函数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    XmlAgg,
    TextAgg,
    ArrayAgg,
    JsonArrayAgg,
    StringAgg,
    Any,
    Some,
    Every,
    StddevPop,
    StddevSamp,
    VarPop,
    VarSamp,
    Rank,
    DenseRank,
    RowNumber,
}

impl AggregateFunction {
    pub const ALL: [AggregateFunction; 20] = [
        AggregateFunction::Count,
        AggregateFunction::Sum,
        AggregateFunction::Avg,
        AggregateFunction::Min,
        AggregateFunction::Max,
        AggregateFunction::XmlAgg,
        AggregateFunction::TextAgg,
        AggregateFunction::ArrayAgg,
        AggregateFunction::JsonArrayAgg,
        AggregateFunction::StringAgg,
        AggregateFunction::Any,
        AggregateFunction::Some,
        AggregateFunction::Every,
        AggregateFunction::StddevPop,
        AggregateFunction::StddevSamp,
        AggregateFunction::VarPop,
        AggregateFunction::VarSamp,
        AggregateFunction::Rank,
        AggregateFunction::DenseRank,
        AggregateFunction::RowNumber,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::XmlAgg => "XMLAGG",
            AggregateFunction::TextAgg => "TEXTAGG",
            AggregateFunction::ArrayAgg => "ARRAY_AGG",
            AggregateFunction::JsonArrayAgg => "JSONARRAY_AGG",
            AggregateFunction::StringAgg => "STRING_AGG",
            AggregateFunction::Any => "ANY",
            AggregateFunction::Some => "SOME",
            AggregateFunction::Every => "EVERY",
            AggregateFunction::StddevPop => "STDDEV_POP",
            AggregateFunction::StddevSamp => "STDDEV_SAMP",
            AggregateFunction::VarPop => "VAR_POP",
            AggregateFunction::VarSamp => "VAR_SAMP",
            AggregateFunction::Rank => "RANK",
            AggregateFunction::DenseRank => "DENSE_RANK",
            AggregateFunction::RowNumber => "ROW_NUMBER",
        }
    }

    /// 按名称查找（大小写不敏感）
    pub fn from_name(name: &str) -> Option<AggregateFunction> {
        Self::ALL
            .iter()
            .copied()
            .find(|function| function.name().eq_ignore_ascii_case(name.trim()))
    }

    /// 排名类分析函数
    pub fn is_analytical(&self) -> bool {
        matches!(
            self,
            AggregateFunction::Rank | AggregateFunction::DenseRank | AggregateFunction::RowNumber
        )
    }

    /// 可以不带参数：`COUNT(*)` 和排名函数
    pub fn allows_missing_argument(&self) -> bool {
        *self == AggregateFunction::Count || self.is_analytical()
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct AggregateSymbol {
    name: String,
    function: AggregateFunction,
    distinct: bool,
    expression: Option<Box<Expression>>,
    order_by: Option<OrderBy>,
    condition: Option<Box<Criteria>>,
    windowed: bool,
}

impl AggregateSymbol {
    /// 构造聚合
    ///
    /// 未知的函数名返回 `UnknownAggregate`，需要参数的函数缺少参数时返回 `InvalidArgument`。
    pub fn new(
        name: impl Into<String>,
        distinct: bool,
        expression: Option<Expression>,
    ) -> ExpressionResult<Self> {
        let name = name.into();
        let function = AggregateFunction::from_name(&name)
            .ok_or_else(|| ExpressionError::unknown_aggregate(name.clone()))?;
        if expression.is_none() && !function.allows_missing_argument() {
            return Err(ExpressionError::invalid_argument(format!(
                "聚合函数 {} 需要参数",
                function
            )));
        }
        Ok(Self {
            name,
            function,
            distinct,
            expression: expression.map(Box::new),
            order_by: None,
            condition: None,
            windowed: false,
        })
    }

    /// `COUNT(*)`
    pub fn count_star() -> Self {
        Self {
            name: AggregateFunction::Count.name().to_string(),
            function: AggregateFunction::Count,
            distinct: false,
            expression: None,
            order_by: None,
            condition: None,
            windowed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }

    pub fn expression(&self) -> Option<&Expression> {
        self.expression.as_deref()
    }

    pub fn expression_mut(&mut self) -> Option<&mut Expression> {
        self.expression.as_deref_mut()
    }

    pub fn set_expression(&mut self, expression: Option<Expression>) {
        self.expression = expression.map(Box::new);
    }

    pub fn order_by(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    pub fn order_by_mut(&mut self) -> Option<&mut OrderBy> {
        self.order_by.as_mut()
    }

    pub fn set_order_by(&mut self, order_by: Option<OrderBy>) {
        self.order_by = order_by;
    }

    /// FILTER 子句
    pub fn condition(&self) -> Option<&Criteria> {
        self.condition.as_deref()
    }

    pub fn condition_mut(&mut self) -> Option<&mut Criteria> {
        self.condition.as_deref_mut()
    }

    pub fn set_condition(&mut self, condition: Option<Criteria>) {
        self.condition = condition.map(Box::new);
    }

    /// 参数、排序项和 FILTER 子句中的表达式
    pub(crate) fn children_mut(&mut self) -> Vec<&mut Expression> {
        let mut children: Vec<&mut Expression> =
            self.expression.as_deref_mut().into_iter().collect();
        if let Some(order_by) = self.order_by.as_mut() {
            children.extend(order_by.items_mut().iter_mut().map(|item| &mut item.expression));
        }
        if let Some(condition) = self.condition.as_deref_mut() {
            children.extend(condition.expressions_mut());
        }
        children
    }

    pub fn is_count_star(&self) -> bool {
        self.function == AggregateFunction::Count && self.expression.is_none()
    }

    pub fn is_windowed(&self) -> bool {
        self.windowed
    }

    /// 由 `WindowFunction` 在挂接聚合时调用
    pub(crate) fn set_windowed(&mut self, windowed: bool) {
        self.windowed = windowed;
    }

    pub fn is_analytical(&self) -> bool {
        self.function.is_analytical()
    }

    /// 结果是否受输入重复行影响
    pub fn is_cardinality_dependent(&self) -> bool {
        match self.function {
            AggregateFunction::Min
            | AggregateFunction::Max
            | AggregateFunction::Any
            | AggregateFunction::Some
            | AggregateFunction::Every => false,
            _ => !self.distinct,
        }
    }

    /// 按函数和参数类型推导结果类型
    pub fn data_type(&self) -> Option<DataType> {
        let arg_type = || self.expression.as_ref().and_then(|e| e.get_type());
        match self.function {
            AggregateFunction::Count
            | AggregateFunction::Rank
            | AggregateFunction::DenseRank
            | AggregateFunction::RowNumber => Some(DataType::Integer),
            AggregateFunction::Sum => {
                arg_type().map(|t| lookup_promotion(&SUM_TYPES, &t).unwrap_or(t))
            }
            AggregateFunction::Avg => {
                arg_type().map(|t| lookup_promotion(&AVG_TYPES, &t).unwrap_or(t))
            }
            AggregateFunction::ArrayAgg => arg_type().map(DataType::array_of),
            AggregateFunction::XmlAgg => Some(DataType::Xml),
            AggregateFunction::TextAgg => Some(DataType::Blob),
            AggregateFunction::JsonArrayAgg => Some(DataType::Clob),
            AggregateFunction::StddevPop
            | AggregateFunction::StddevSamp
            | AggregateFunction::VarPop
            | AggregateFunction::VarSamp => Some(DataType::Double),
            _ => arg_type(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.expression
            .as_ref()
            .map_or(true, |expression| expression.is_resolved())
            && self.data_type().is_some()
    }
}

impl PartialEq for AggregateSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.function == other.function
            && self.distinct == other.distinct
            && self.expression == other.expression
            && self.order_by == other.order_by
            && self.condition == other.condition
    }
}

impl Eq for AggregateSymbol {}

impl Hash for AggregateSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.function.hash(state);
        self.expression.hash(state);
    }
}
