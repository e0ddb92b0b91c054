//! 派生符号
//!
//! - `AliasSymbol`：给表达式起别名，不能再包装别名
//! - `ExpressionSymbol`：给匿名表达式一个名称，身份由被包装的表达式决定
//! - `MultipleElementSymbol`：`*` 与 `group.*`，由解析器展开成元素列表

use std::hash::{Hash, Hasher};

use super::capability::{DerivedExpression, Typed};
use super::def::Expression;
use super::element_symbol::ElementSymbol;
use super::group_symbol::GroupSymbol;
use super::symbol::{Symbol, SEPARATOR};
use crate::core::error::{ExpressionError, ExpressionResult};
use crate::core::murmur;
use crate::core::types::DataType;

fn reject_alias(expression: &Expression) -> ExpressionResult<()> {
    if matches!(expression, Expression::AliasSymbol(_)) {
        return Err(ExpressionError::invalid_argument("别名不能包装另一个别名"));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct AliasSymbol {
    symbol: Symbol,
    expression: Box<Expression>,
}

impl AliasSymbol {
    pub fn new(name: impl Into<String>, expression: Expression) -> ExpressionResult<Self> {
        reject_alias(&expression)?;
        Ok(Self {
            symbol: Symbol::new(name),
            expression: Box::new(expression),
        })
    }

    pub fn name(&self) -> &str {
        self.symbol.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.symbol.set_name(name);
    }

    pub fn canonical_name(&self) -> &str {
        self.symbol.canonical_name()
    }

    pub fn output_name(&self) -> &str {
        self.symbol.output_name()
    }

    pub fn set_output_name(&mut self, output_name: Option<String>) {
        self.symbol.set_output_name(output_name);
    }

    pub fn symbol(&self) -> &Expression {
        &self.expression
    }

    pub fn symbol_mut(&mut self) -> &mut Expression {
        &mut self.expression
    }

    pub fn set_symbol(&mut self, expression: Expression) -> ExpressionResult<()> {
        reject_alias(&expression)?;
        self.expression = Box::new(expression);
        Ok(())
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.expression.get_type()
    }
}

impl PartialEq for AliasSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.expression == other.expression
    }
}

impl Eq for AliasSymbol {}

impl Hash for AliasSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.symbol.hash_code());
    }
}

impl DerivedExpression for AliasSymbol {
    fn expression(&self) -> &Expression {
        &self.expression
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionSymbol {
    symbol: Symbol,
    expression: Box<Expression>,
}

impl ExpressionSymbol {
    pub fn new(name: impl Into<String>, expression: Expression) -> Self {
        Self {
            symbol: Symbol::new(name),
            expression: Box::new(expression),
        }
    }

    pub fn name(&self) -> &str {
        self.symbol.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.symbol.set_name(name);
    }

    pub fn output_name(&self) -> &str {
        self.symbol.output_name()
    }

    pub fn set_output_name(&mut self, output_name: Option<String>) {
        self.symbol.set_output_name(output_name);
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn expression_mut(&mut self) -> &mut Expression {
        &mut self.expression
    }

    pub fn set_expression(&mut self, expression: Expression) {
        self.expression = Box::new(expression);
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.expression.get_type()
    }
}

impl PartialEq for ExpressionSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl Eq for ExpressionSymbol {}

impl Hash for ExpressionSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(murmur::hash_code(&self.expression));
    }
}

impl DerivedExpression for ExpressionSymbol {
    fn expression(&self) -> &Expression {
        &self.expression
    }
}

/// `*` 或 `group.*`
#[derive(Debug, Clone)]
pub struct MultipleElementSymbol {
    group: Option<GroupSymbol>,
    elements: Option<Vec<ElementSymbol>>,
}

impl MultipleElementSymbol {
    /// `*`
    pub fn all() -> Self {
        Self {
            group: None,
            elements: None,
        }
    }

    /// `group.*`
    pub fn all_in_group(group: GroupSymbol) -> Self {
        Self {
            group: Some(group),
            elements: None,
        }
    }

    pub fn name(&self) -> String {
        match &self.group {
            Some(group) => format!("{}{}*", group.name(), SEPARATOR),
            None => "*".to_string(),
        }
    }

    pub fn group(&self) -> Option<&GroupSymbol> {
        self.group.as_ref()
    }

    pub fn group_mut(&mut self) -> Option<&mut GroupSymbol> {
        self.group.as_mut()
    }

    /// 解析器展开后的元素
    pub fn elements(&self) -> Option<&[ElementSymbol]> {
        self.elements.as_deref()
    }

    pub fn set_elements(&mut self, elements: Vec<ElementSymbol>) {
        self.elements = Some(elements);
    }

    pub fn add_element(&mut self, element: ElementSymbol) {
        self.elements.get_or_insert_with(Vec::new).push(element);
    }

    pub fn is_resolved(&self) -> bool {
        self.elements.is_some()
    }
}

impl PartialEq for MultipleElementSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
    }
}

impl Eq for MultipleElementSymbol {}

impl Hash for MultipleElementSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.group {
            Some(group) => group.hash(state),
            None => state.write_u64(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::expression::{Constant, Function};

    fn plus() -> Expression {
        Expression::Function(Function::new(
            "+",
            vec![
                Expression::Constant(Constant::new(1)),
                Expression::Constant(Constant::new(2)),
            ],
        ))
    }

    #[test]
    fn test_alias_cannot_wrap_alias() {
        let alias = AliasSymbol::new("x", plus()).expect("表达式可以起别名");
        let nested = AliasSymbol::new("y", Expression::AliasSymbol(alias.clone()));
        assert!(nested.is_err());

        let mut other = AliasSymbol::new("z", plus()).expect("表达式可以起别名");
        assert!(other.set_symbol(Expression::AliasSymbol(alias)).is_err());
        assert_eq!(other.symbol(), &plus());
    }

    #[test]
    fn test_alias_equality() {
        let a = AliasSymbol::new("x", plus()).expect("合法");
        let b = AliasSymbol::new("X", plus()).expect("合法");
        let c = AliasSymbol::new("y", plus()).expect("合法");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_expression_symbol_keys_on_expression() {
        let a = ExpressionSymbol::new("expr1", plus());
        let b = ExpressionSymbol::new("expr2", plus());
        assert_eq!(a, b);
        assert_eq!(murmur::hash_code(&a), murmur::hash_code(&b));
        assert_ne!(a, ExpressionSymbol::new("expr1", Expression::Constant(Constant::new(1))));
    }

    #[test]
    fn test_multiple_element_symbol() {
        let mut all = MultipleElementSymbol::all_in_group(GroupSymbol::new("g1"));
        assert_eq!(all.name(), "g1.*");
        assert!(!all.is_resolved());
        all.add_element(ElementSymbol::new("g1.e1"));
        assert!(all.is_resolved());
        assert_eq!(all.elements().map(|e| e.len()), Some(1));

        assert_eq!(MultipleElementSymbol::all().name(), "*");
        assert_ne!(MultipleElementSymbol::all(), all);
    }
}
