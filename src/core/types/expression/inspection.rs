//! 表达式检查方法
//!
//! 提供检查表达式属性和状态的方法。

use super::{AggregateSymbol, Constant, ElementSymbol, Expression, Function};

impl Expression {
    /// 变体名称，用于日志和错误信息
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Constant(_) => "Constant",
            Expression::ElementSymbol(_) => "ElementSymbol",
            Expression::Reference(_) => "Reference",
            Expression::Function(_) => "Function",
            Expression::AggregateSymbol(_) => "AggregateSymbol",
            Expression::WindowFunction(_) => "WindowFunction",
            Expression::Array(_) => "Array",
            Expression::CaseExpression(_) => "CaseExpression",
            Expression::SearchedCaseExpression(_) => "SearchedCaseExpression",
            Expression::ScalarSubquery(_) => "ScalarSubquery",
            Expression::AliasSymbol(_) => "AliasSymbol",
            Expression::ExpressionSymbol(_) => "ExpressionSymbol",
            Expression::MultipleElementSymbol(_) => "MultipleElementSymbol",
            Expression::XmlElement(_) => "XmlElement",
            Expression::XmlForest(_) => "XmlForest",
            Expression::XmlQuery(_) => "XmlQuery",
            Expression::XmlCast(_) => "XmlCast",
            Expression::XmlParse(_) => "XmlParse",
            Expression::XmlSerialize(_) => "XmlSerialize",
            Expression::XmlExists(_) => "XmlExists",
        }
    }

    /// 是否为命名符号（可出现在 SELECT 列表中并产生列名）
    pub fn is_symbol(&self) -> bool {
        matches!(
            self,
            Expression::ElementSymbol(_)
                | Expression::AliasSymbol(_)
                | Expression::ExpressionSymbol(_)
                | Expression::MultipleElementSymbol(_)
        )
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Expression::Constant(_))
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Expression::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn as_element_symbol(&self) -> Option<&ElementSymbol> {
        match self {
            Expression::ElementSymbol(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Expression::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<&AggregateSymbol> {
        match self {
            Expression::AggregateSymbol(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    /// 是否为引擎插入的隐式函数
    pub fn is_implicit_function(&self) -> bool {
        matches!(self, Expression::Function(function) if function.is_implicit())
    }

    /// 去掉别名/命名包装后的表达式
    pub fn unwrap_symbol(&self) -> &Expression {
        match self {
            Expression::AliasSymbol(alias) => alias.symbol().unwrap_symbol(),
            Expression::ExpressionSymbol(symbol) => symbol.expression().unwrap_symbol(),
            other => other,
        }
    }

    /// 检查表达式是否包含聚合函数（不进入子查询）
    pub fn contains_aggregate(&self) -> bool {
        self.find(&|e| matches!(e, Expression::AggregateSymbol(_))).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_symbol() {
        let inner =
            Expression::function("+", vec![Expression::constant(1), Expression::constant(2)]);
        let named = inner.clone().named("expr1").alias("x").expect("合法");
        assert_eq!(named.unwrap_symbol(), &inner);
        assert!(named.is_symbol());
        assert!(!inner.is_symbol());
    }

    #[test]
    fn test_contains_aggregate() {
        let sum =
            Expression::aggregate("SUM", false, Some(Expression::element("e1"))).expect("合法");
        let outer = Expression::function("abs", vec![sum]);
        assert!(outer.contains_aggregate());
        assert!(!Expression::element("e1").contains_aggregate());
        assert_eq!(outer.kind_name(), "Function");
    }
}
