//! CASE 表达式
//!
//! 两种形式共享 THEN 列表、ELSE 和已解析类型；WHEN 与 THEN 列表长度必须相等且不为空。

use super::criteria::Criteria;
use super::def::Expression;
use crate::core::error::{ExpressionError, ExpressionResult};
use crate::core::types::DataType;

fn validate_when_then(when_count: usize, then_count: usize) -> ExpressionResult<()> {
    if when_count == 0 {
        return Err(ExpressionError::invalid_argument("CASE 至少需要一个 WHEN 分支"));
    }
    if when_count != then_count {
        return Err(ExpressionError::invalid_argument(format!(
            "WHEN 与 THEN 数量不一致: {} 与 {}",
            when_count, then_count
        )));
    }
    Ok(())
}

/// 两种 CASE 共有的部分
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseBase {
    then: Vec<Expression>,
    else_expression: Option<Box<Expression>>,
    data_type: Option<DataType>,
}

impl CaseBase {
    fn new(then: Vec<Expression>) -> Self {
        Self {
            then,
            else_expression: None,
            data_type: None,
        }
    }
}

/// CASE 表达式公共接口
pub trait AbstractCaseExpression {
    fn base(&self) -> &CaseBase;

    fn base_mut(&mut self) -> &mut CaseBase;

    fn when_count(&self) -> usize {
        self.base().then.len()
    }

    fn then_expressions(&self) -> &[Expression] {
        &self.base().then
    }

    fn then_expression(&self, index: usize) -> Option<&Expression> {
        self.base().then.get(index)
    }

    fn then_expressions_mut(&mut self) -> &mut [Expression] {
        &mut self.base_mut().then
    }

    fn else_expression(&self) -> Option<&Expression> {
        self.base().else_expression.as_deref()
    }

    fn else_expression_mut(&mut self) -> Option<&mut Expression> {
        self.base_mut().else_expression.as_deref_mut()
    }

    fn set_else_expression(&mut self, else_expression: Option<Expression>) {
        self.base_mut().else_expression = else_expression.map(Box::new);
    }

    fn data_type(&self) -> Option<&DataType> {
        self.base().data_type.as_ref()
    }

    fn set_type(&mut self, data_type: DataType) {
        self.base_mut().data_type = Some(data_type);
    }
}

/// 简单 CASE：`CASE expr WHEN v THEN r ... END`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseExpression {
    expression: Box<Expression>,
    when: Vec<Expression>,
    base: CaseBase,
}

impl CaseExpression {
    pub fn new(
        expression: Expression,
        when: Vec<Expression>,
        then: Vec<Expression>,
    ) -> ExpressionResult<Self> {
        validate_when_then(when.len(), then.len())?;
        Ok(Self {
            expression: Box::new(expression),
            when,
            base: CaseBase::new(then),
        })
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

    pub fn when(&self) -> &[Expression] {
        &self.when
    }

    pub fn when_expression(&self, index: usize) -> Option<&Expression> {
        self.when.get(index)
    }

    pub fn when_mut(&mut self) -> &mut [Expression] {
        &mut self.when
    }

    /// 同时替换 WHEN 与 THEN 列表，重新校验长度
    pub fn set_when(
        &mut self,
        when: Vec<Expression>,
        then: Vec<Expression>,
    ) -> ExpressionResult<()> {
        validate_when_then(when.len(), then.len())?;
        self.when = when;
        self.base.then = then;
        Ok(())
    }
}

impl CaseExpression {
    /// 按 `expr, when1, then1, ..., else` 的顺序
    pub(crate) fn children_mut(&mut self) -> Vec<&mut Expression> {
        let mut children = vec![self.expression.as_mut()];
        for (when, then) in self.when.iter_mut().zip(self.base.then.iter_mut()) {
            children.push(when);
            children.push(then);
        }
        children.extend(self.base.else_expression.as_deref_mut());
        children
    }
}

impl AbstractCaseExpression for CaseExpression {
    fn base(&self) -> &CaseBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CaseBase {
        &mut self.base
    }
}

/// 搜索型 CASE：`CASE WHEN cond THEN r ... END`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchedCaseExpression {
    when: Vec<Criteria>,
    base: CaseBase,
}

impl SearchedCaseExpression {
    pub fn new(when: Vec<Criteria>, then: Vec<Expression>) -> ExpressionResult<Self> {
        validate_when_then(when.len(), then.len())?;
        Ok(Self {
            when,
            base: CaseBase::new(then),
        })
    }

    pub fn when(&self) -> &[Criteria] {
        &self.when
    }

    pub fn when_criteria(&self, index: usize) -> Option<&Criteria> {
        self.when.get(index)
    }

    pub fn when_mut(&mut self) -> &mut [Criteria] {
        &mut self.when
    }

    pub fn set_when(&mut self, when: Vec<Criteria>, then: Vec<Expression>) -> ExpressionResult<()> {
        validate_when_then(when.len(), then.len())?;
        self.when = when;
        self.base.then = then;
        Ok(())
    }
}

impl SearchedCaseExpression {
    pub(crate) fn children_mut(&mut self) -> Vec<&mut Expression> {
        let mut children = Vec::new();
        for (when, then) in self.when.iter_mut().zip(self.base.then.iter_mut()) {
            children.extend(when.expressions_mut());
            children.push(then);
        }
        children.extend(self.base.else_expression.as_deref_mut());
        children
    }
}

impl AbstractCaseExpression for SearchedCaseExpression {
    fn base(&self) -> &CaseBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CaseBase {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::expression::{CompareOperator, Constant, ElementSymbol};

    fn int(value: i32) -> Expression {
        Expression::Constant(Constant::new(value))
    }

    fn element(name: &str) -> Expression {
        Expression::ElementSymbol(ElementSymbol::new(name))
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(CaseExpression::new(element("e1"), vec![int(1), int(2)], vec![int(3)]).is_err());
        assert!(CaseExpression::new(element("e1"), vec![], vec![]).is_err());
        let when = vec![Criteria::is_null(element("e1"))];
        assert!(SearchedCaseExpression::new(when, vec![int(1), int(2)]).is_err());
    }

    #[test]
    fn test_set_when_revalidates() {
        let mut case = CaseExpression::new(element("e1"), vec![int(1)], vec![int(2)])
            .expect("长度一致");
        assert!(case.set_when(vec![int(1)], vec![]).is_err());
        assert_eq!(case.when_count(), 1);
        case.set_when(vec![int(1), int(2)], vec![int(3), int(4)])
            .expect("长度一致");
        assert_eq!(case.when_count(), 2);
        assert_eq!(case.then_expression(1), Some(&int(4)));
    }

    #[test]
    fn test_equality_covers_base_and_when() {
        let mut a = CaseExpression::new(element("e1"), vec![int(1)], vec![int(2)])
            .expect("长度一致");
        let mut b = a.clone();
        assert_eq!(a, b);

        b.set_else_expression(Some(int(9)));
        assert_ne!(a, b);
        a.set_else_expression(Some(int(9)));
        assert_eq!(a, b);

        b.set_type(DataType::Integer);
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone_keeps_type_and_is_deep() {
        let when = vec![Criteria::compare(element("e1"), CompareOperator::Gt, int(0))];
        let mut case = SearchedCaseExpression::new(when, vec![int(1)]).expect("长度一致");
        case.set_else_expression(Some(int(0)));
        case.set_type(DataType::Integer);

        let mut copy = case.clone();
        assert_eq!(copy.data_type(), Some(&DataType::Integer));
        copy.then_expressions_mut()[0] = int(7);
        assert_eq!(case.then_expression(0), Some(&int(1)));
        if let Some(else_expression) = copy.else_expression_mut() {
            *else_expression = int(8);
        }
        assert_eq!(case.else_expression(), Some(&int(0)));
    }
}
