//! 派生列
//!
//! XMLFOREST、XMLATTRIBUTES、XMLQUERY PASSING 等多参数构造器中的 `表达式 AS 别名` 对。

use super::capability::DerivedExpression;
use super::def::Expression;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivedColumn {
    alias: Option<String>,
    expression: Expression,
    propagate_name: bool,
}

impl DerivedColumn {
    pub fn new(alias: Option<String>, expression: Expression) -> Self {
        Self {
            alias,
            expression,
            propagate_name: true,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn set_alias(&mut self, alias: Option<String>) {
        self.alias = alias;
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn expression_mut(&mut self) -> &mut Expression {
        &mut self.expression
    }

    pub fn set_expression(&mut self, expression: Expression) {
        self.expression = expression;
    }

    pub fn propagate_name(&self) -> bool {
        self.propagate_name
    }

    pub fn set_propagate_name(&mut self, propagate_name: bool) {
        self.propagate_name = propagate_name;
    }

    /// 生成的列名：显式别名优先，允许传播时取元素的短名
    pub fn output_name(&self) -> Option<String> {
        if let Some(alias) = &self.alias {
            return Some(alias.clone());
        }
        match &self.expression {
            Expression::ElementSymbol(element) if self.propagate_name => {
                Some(element.short_name().to_string())
            }
            _ => None,
        }
    }
}

impl DerivedExpression for DerivedColumn {
    fn expression(&self) -> &Expression {
        &self.expression
    }
}
