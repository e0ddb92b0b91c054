//! 引用
//!
//! 绑定参数（按位置）或相关引用（指向外层作用域的元素），二者在构造时确定。

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::element_symbol::ElementSymbol;
use crate::core::error::{ExpressionError, ExpressionResult};
use crate::core::types::DataType;
use crate::core::value::Value;

/// 绑定值校验
///
/// 由外部求值器在绑定值时调用。克隆引用时共享同一个约束对象。
pub trait Constraint: Send + Sync + fmt::Debug {
    fn validate(&self, value: &Value) -> ExpressionResult<()>;
}

#[derive(Debug, Clone)]
pub enum ReferenceTarget {
    /// 位置参数
    Positional { index: usize },
    /// 外层作用域的元素
    Correlated { expression: ElementSymbol },
}

#[derive(Debug, Clone)]
pub struct Reference {
    target: ReferenceTarget,
    data_type: Option<DataType>,
    constraint: Option<Arc<dyn Constraint>>,
}

impl Reference {
    pub fn positional(index: usize) -> Self {
        Self {
            target: ReferenceTarget::Positional { index },
            data_type: None,
            constraint: None,
        }
    }

    pub fn correlated(expression: ElementSymbol) -> Self {
        Self {
            target: ReferenceTarget::Correlated { expression },
            data_type: None,
            constraint: None,
        }
    }

    pub fn target(&self) -> &ReferenceTarget {
        &self.target
    }

    pub fn is_positional(&self) -> bool {
        matches!(self.target, ReferenceTarget::Positional { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self.target {
            ReferenceTarget::Positional { index } => Some(index),
            ReferenceTarget::Correlated { .. } => None,
        }
    }

    pub fn expression(&self) -> Option<&ElementSymbol> {
        match &self.target {
            ReferenceTarget::Correlated { expression } => Some(expression),
            ReferenceTarget::Positional { .. } => None,
        }
    }

    pub fn expression_mut(&mut self) -> Option<&mut ElementSymbol> {
        match &mut self.target {
            ReferenceTarget::Correlated { expression } => Some(expression),
            ReferenceTarget::Positional { .. } => None,
        }
    }

    /// 位置参数返回显式设置的类型，相关引用返回所引用元素的类型
    pub fn data_type(&self) -> Option<&DataType> {
        match &self.target {
            ReferenceTarget::Positional { .. } => self.data_type.as_ref(),
            ReferenceTarget::Correlated { expression } => expression.data_type(),
        }
    }

    /// 只能给位置参数设置类型
    pub fn set_type(&mut self, data_type: DataType) -> ExpressionResult<()> {
        match self.target {
            ReferenceTarget::Positional { .. } => {
                self.data_type = Some(data_type);
                Ok(())
            }
            ReferenceTarget::Correlated { .. } => Err(ExpressionError::invalid_operation(
                "相关引用的类型由所引用的元素决定",
            )),
        }
    }

    /// 是否需要按外层行重新求值
    ///
    /// 位置参数不相关；指向非标量临时作用域的相关引用也不相关。
    pub fn is_correlated(&self) -> bool {
        match &self.target {
            ReferenceTarget::Positional { .. } => false,
            ReferenceTarget::Correlated { expression } => !expression
                .group_symbol()
                .and_then(|group| group.metadata_id())
                .is_some_and(|id| id.is_temp() && !id.is_scalar_group()),
        }
    }

    pub fn constraint(&self) -> Option<&Arc<dyn Constraint>> {
        self.constraint.as_ref()
    }

    pub fn set_constraint(&mut self, constraint: Option<Arc<dyn Constraint>>) {
        self.constraint = constraint;
    }

    /// 用附加的约束校验绑定值，没有约束时总是通过
    pub fn validate(&self, value: &Value) -> ExpressionResult<()> {
        match &self.constraint {
            Some(constraint) => constraint.validate(value),
            None => Ok(()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        match &self.target {
            ReferenceTarget::Positional { .. } => self.data_type.is_some(),
            ReferenceTarget::Correlated { expression } => expression.is_resolved(),
        }
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        match (&self.target, &other.target) {
            (
                ReferenceTarget::Positional { index },
                ReferenceTarget::Positional { index: other_index },
            ) => index == other_index,
            (
                ReferenceTarget::Correlated { expression },
                ReferenceTarget::Correlated {
                    expression: other_expression,
                },
            ) => expression == other_expression,
            _ => false,
        }
    }
}

impl Eq for Reference {}

impl Hash for Reference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.target {
            ReferenceTarget::Positional { index } => index.hash(state),
            ReferenceTarget::Correlated { expression } => expression.hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::murmur::hash_code;
    use crate::core::types::expression::GroupSymbol;
    use crate::core::types::metadata::MetadataId;

    #[derive(Debug)]
    struct NotNull;

    impl Constraint for NotNull {
        fn validate(&self, value: &Value) -> ExpressionResult<()> {
            if value.is_null() {
                Err(ExpressionError::validation_error("值不能为空"))
            } else {
                Ok(())
            }
        }
    }

    fn correlated_in(metadata_id: MetadataId) -> Reference {
        let mut group = GroupSymbol::new("g1");
        group.set_metadata_id(metadata_id);
        Reference::correlated(ElementSymbol::with_group("e1", group))
    }

    #[test]
    fn test_positional_identity_ignores_type() {
        let a = Reference::positional(0);
        let mut b = Reference::positional(0);
        b.set_type(DataType::Integer).expect("位置参数可设置类型");
        assert_eq!(a, b);
        assert_eq!(hash_code(&a), hash_code(&b));
        assert_ne!(a, Reference::positional(1));
        assert_eq!(b.data_type(), Some(&DataType::Integer));
    }

    #[test]
    fn test_correlated_type_delegates() {
        let mut element = ElementSymbol::new("e1");
        element.set_type(DataType::Long);
        let mut reference = Reference::correlated(element.clone());
        assert_eq!(reference.data_type(), Some(&DataType::Long));
        assert!(reference.set_type(DataType::String).is_err());
        assert_eq!(reference, Reference::correlated(element));
    }

    #[test]
    fn test_is_correlated() {
        assert!(!Reference::positional(0).is_correlated());
        assert!(Reference::correlated(ElementSymbol::new("e1")).is_correlated());
        assert!(correlated_in(MetadataId::catalog("g1")).is_correlated());
        assert!(correlated_in(MetadataId::scalar_group("vars")).is_correlated());
        assert!(!correlated_in(MetadataId::temp("#t")).is_correlated());
    }

    #[test]
    fn test_constraint_shared_by_clone() {
        let mut reference = Reference::positional(0);
        reference.set_constraint(Some(Arc::new(NotNull)));
        let copy = reference.clone();
        assert!(copy.validate(&Value::Null).is_err());
        assert!(copy.validate(&Value::Integer(1)).is_ok());
        match (reference.constraint(), copy.constraint()) {
            (Some(a), Some(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("约束应被保留"),
        }
    }
}
