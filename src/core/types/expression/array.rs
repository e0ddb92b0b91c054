//! 数组表达式

use super::capability::Typed;
use super::def::Expression;
use crate::core::types::DataType;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Array {
    component_type: Option<DataType>,
    expressions: Vec<Expression>,
}

impl Array {
    pub fn new(expressions: Vec<Expression>) -> Self {
        Self {
            component_type: None,
            expressions,
        }
    }

    pub fn with_component_type(component_type: DataType, expressions: Vec<Expression>) -> Self {
        Self {
            component_type: Some(component_type),
            expressions,
        }
    }

    pub fn component_type(&self) -> Option<&DataType> {
        self.component_type.as_ref()
    }

    pub fn set_component_type(&mut self, component_type: DataType) {
        self.component_type = Some(component_type);
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn expressions_mut(&mut self) -> &mut Vec<Expression> {
        &mut self.expressions
    }

    /// 元素类型已知时为对应数组类型，否则为 `object`
    pub fn data_type(&self) -> DataType {
        match &self.component_type {
            Some(component) => DataType::array_of(component.clone()),
            None => DataType::Object,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.component_type.is_some() && self.expressions.iter().all(|e| e.is_resolved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::expression::Constant;

    #[test]
    fn test_array_type() {
        let items = vec![
            Expression::Constant(Constant::new(1)),
            Expression::Constant(Constant::new(2)),
        ];
        let mut array = Array::new(items.clone());
        assert_eq!(array.data_type(), DataType::Object);
        assert!(!array.is_resolved());

        array.set_component_type(DataType::Integer);
        assert_eq!(array.data_type(), DataType::array_of(DataType::Integer));
        assert!(array.is_resolved());
        assert_eq!(array, Array::with_component_type(DataType::Integer, items));
    }
}
