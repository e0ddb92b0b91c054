//! 查询命令外壳
//!
//! 标量子查询所包装的命令。只保留表达式模型需要的结构：
//! 投影列表、FROM 分组、WHERE 谓词和 ORDER BY。

use super::capability::Typed;
use super::criteria::Criteria;
use super::def::Expression;
use super::group_symbol::GroupSymbol;
use super::order_by::OrderBy;
use crate::core::murmur;
use crate::core::types::DataType;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Query {
    pub select: Vec<Expression>,
    pub from: Vec<GroupSymbol>,
    pub criteria: Option<Criteria>,
    pub order_by: Option<OrderBy>,
}

impl Query {
    pub fn new(select: Vec<Expression>) -> Self {
        Self {
            select,
            ..Self::default()
        }
    }

    pub fn with_from(mut self, from: Vec<GroupSymbol>) -> Self {
        self.from = from;
        self
    }

    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn projected_symbols(&self) -> &[Expression] {
        &self.select
    }

    /// 第 `index` 个投影列的类型
    pub fn projected_type(&self, index: usize) -> Option<DataType> {
        self.select.get(index).and_then(|e| e.get_type())
    }

    pub fn hash_code(&self) -> u64 {
        murmur::hash_code(self)
    }
}
