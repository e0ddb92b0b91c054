//! 表达式构造函数
//!
//! 提供创建各类表达式的工厂方法。会失败的构造（CASE、别名、聚合）返回 `ExpressionResult`。

use super::{
    AbstractCaseExpression, AggregateSymbol, AliasSymbol, Array, CaseExpression, Constant,
    Criteria, ElementSymbol, Expression, ExpressionSymbol, Function, MultipleElementSymbol, Query,
    Reference, ScalarSubquery, SearchedCaseExpression,
};
use crate::core::error::ExpressionResult;
use crate::core::types::DataType;
use crate::core::value::Value;

impl Expression {
    /// 创建常量表达式，类型由值推断
    pub fn constant(value: impl Into<Value>) -> Self {
        Expression::Constant(Constant::new(value))
    }

    /// 创建指定类型的常量表达式
    pub fn typed_constant(value: impl Into<Value>, data_type: DataType) -> ExpressionResult<Self> {
        Ok(Expression::Constant(Constant::with_type(value, data_type)?))
    }

    /// 创建 NULL 常量
    pub fn null() -> Self {
        Expression::Constant(Constant::null())
    }

    /// 创建列引用，限定名会拆出分组
    pub fn element(name: impl Into<String>) -> Self {
        Expression::ElementSymbol(ElementSymbol::new(name))
    }

    /// 创建位置参数
    pub fn parameter(index: usize) -> Self {
        Expression::Reference(Reference::positional(index))
    }

    /// 创建函数调用
    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function(Function::new(name, args))
    }

    /// 创建聚合函数
    pub fn aggregate(
        name: &str,
        distinct: bool,
        expression: Option<Expression>,
    ) -> ExpressionResult<Self> {
        Ok(Expression::AggregateSymbol(AggregateSymbol::new(
            name, distinct, expression,
        )?))
    }

    /// 创建 `COUNT(*)`
    pub fn count_star() -> Self {
        Expression::AggregateSymbol(AggregateSymbol::count_star())
    }

    /// 创建数组构造
    pub fn array(expressions: Vec<Expression>) -> Self {
        Expression::Array(Array::new(expressions))
    }

    /// 创建简单 CASE
    pub fn case(
        expression: Expression,
        when: Vec<Expression>,
        then: Vec<Expression>,
        else_expression: Option<Expression>,
    ) -> ExpressionResult<Self> {
        let mut case = CaseExpression::new(expression, when, then)?;
        case.set_else_expression(else_expression);
        Ok(Expression::CaseExpression(case))
    }

    /// 创建搜索型 CASE
    pub fn searched_case(
        when: Vec<Criteria>,
        then: Vec<Expression>,
        else_expression: Option<Expression>,
    ) -> ExpressionResult<Self> {
        let mut case = SearchedCaseExpression::new(when, then)?;
        case.set_else_expression(else_expression);
        Ok(Expression::SearchedCaseExpression(case))
    }

    /// 创建标量子查询
    pub fn scalar_subquery(command: Query) -> Self {
        Expression::ScalarSubquery(ScalarSubquery::new(command))
    }

    /// 给表达式起别名
    pub fn alias(self, name: impl Into<String>) -> ExpressionResult<Self> {
        Ok(Expression::AliasSymbol(AliasSymbol::new(name, self)?))
    }

    /// 给表达式命名
    pub fn named(self, name: impl Into<String>) -> Self {
        Expression::ExpressionSymbol(ExpressionSymbol::new(name, self))
    }

    /// 创建 `*`
    pub fn all() -> Self {
        Expression::MultipleElementSymbol(MultipleElementSymbol::all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(matches!(Expression::constant(1), Expression::Constant(_)));
        assert!(matches!(Expression::element("g.e"), Expression::ElementSymbol(_)));
        assert!(Expression::aggregate("nope", false, None).is_err());
        assert!(Expression::case(Expression::element("e"), vec![], vec![], None).is_err());

        let alias = Expression::constant(1).alias("x").expect("常量可以起别名");
        assert!(alias.clone().alias("y").is_err());
        assert!(matches!(Expression::constant(1).named("expr"), Expression::ExpressionSymbol(_)));
    }
}
