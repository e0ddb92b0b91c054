//! 函数调用
//!
//! 名称加有序参数列表。解析器绑定类型和函数描述符；
//! 隐式转换函数由 `insert_conversion` 插入，不出现在渲染出的 SQL 中。

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::capability::Typed;
use super::constant::Constant;
use super::def::Expression;
use crate::core::error::{ExpressionError, ExpressionResult};
use crate::core::types::{DataType, TypeRegistry, RUNTIME_TYPES};
use crate::core::value::Value;

/// 隐式转换函数名
pub const CONVERT: &str = "convert";

/// 函数的确定性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Determinism {
    #[default]
    Deterministic,
    /// 同一会话内结果不变
    SessionDeterministic,
    /// 同一命令内结果不变
    CommandDeterministic,
    Nondeterministic,
}

/// 函数库中的一个具体实现
#[derive(Debug, PartialEq, Eq)]
pub struct FunctionMethod {
    pub name: String,
    pub arg_types: Vec<DataType>,
    pub return_type: DataType,
    pub determinism: Determinism,
}

impl FunctionMethod {
    pub fn new(name: impl Into<String>, arg_types: Vec<DataType>, return_type: DataType) -> Self {
        Self {
            name: name.into(),
            arg_types,
            return_type,
            determinism: Determinism::default(),
        }
    }

    pub fn with_determinism(mut self, determinism: Determinism) -> Self {
        self.determinism = determinism;
        self
    }
}

/// 函数描述符
///
/// 按底层实现的身份比较，两个描述符指向同一个 `FunctionMethod` 时才相同。
#[derive(Debug, Clone)]
pub struct FunctionDescriptor {
    method: Arc<FunctionMethod>,
}

impl FunctionDescriptor {
    pub fn new(method: Arc<FunctionMethod>) -> Self {
        Self { method }
    }

    pub fn method(&self) -> &Arc<FunctionMethod> {
        &self.method
    }

    pub fn name(&self) -> &str {
        &self.method.name
    }

    pub fn arg_types(&self) -> &[DataType] {
        &self.method.arg_types
    }

    pub fn return_type(&self) -> &DataType {
        &self.method.return_type
    }

    pub fn determinism(&self) -> Determinism {
        self.method.determinism
    }

    pub fn same_method(&self, other: &FunctionDescriptor) -> bool {
        Arc::ptr_eq(&self.method, &other.method)
    }
}

#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    args: Vec<Expression>,
    data_type: Option<DataType>,
    descriptor: Option<FunctionDescriptor>,
    implicit: bool,
}

impl Function {
    pub fn new(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            args,
            data_type: None,
            descriptor: None,
            implicit: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    pub fn args_mut(&mut self) -> &mut [Expression] {
        &mut self.args
    }

    pub fn arg(&self, index: usize) -> Option<&Expression> {
        self.args.get(index)
    }

    pub fn set_arg(&mut self, index: usize, expression: Expression) -> ExpressionResult<()> {
        let arg_count = self.args.len();
        let slot = self.args.get_mut(index).ok_or_else(|| {
            ExpressionError::invalid_argument(format!(
                "参数下标越界: {} (共 {} 个参数)",
                index, arg_count
            ))
        })?;
        *slot = expression;
        Ok(())
    }

    pub fn set_args(&mut self, args: Vec<Expression>) {
        self.args = args;
    }

    pub fn data_type(&self) -> Option<&DataType> {
        self.data_type.as_ref()
    }

    pub fn set_type(&mut self, data_type: DataType) {
        self.data_type = Some(data_type);
    }

    pub fn descriptor(&self) -> Option<&FunctionDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn set_descriptor(&mut self, descriptor: FunctionDescriptor) {
        self.descriptor = Some(descriptor);
    }

    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    pub fn set_implicit(&mut self, implicit: bool) {
        self.implicit = implicit;
    }

    /// 用隐式转换函数包装第 `index` 个参数
    ///
    /// 新节点的参数为原表达式和目标类型名常量，类型和描述符取自 `descriptor`。
    pub fn insert_conversion(
        &mut self,
        index: usize,
        descriptor: FunctionDescriptor,
    ) -> ExpressionResult<()> {
        let arg_count = self.args.len();
        let slot = self.args.get_mut(index).ok_or_else(|| {
            ExpressionError::invalid_argument(format!(
                "参数下标越界: {} (共 {} 个参数)",
                index, arg_count
            ))
        })?;

        let target_type = descriptor.return_type().clone();
        let type_name = RUNTIME_TYPES.type_name(&target_type);
        log::trace!(
            "函数 {} 的第 {} 个参数插入隐式转换: {}",
            self.name,
            index,
            type_name
        );

        let original = std::mem::replace(slot, Expression::Constant(Constant::null()));
        let mut conversion = Function::new(
            descriptor.name().to_string(),
            vec![original, Expression::Constant(Constant::new(Value::String(type_name)))],
        );
        conversion.set_implicit(true);
        conversion.set_type(target_type);
        conversion.set_descriptor(descriptor);
        *slot = Expression::Function(conversion);
        Ok(())
    }

    /// 所有参数均已解析且类型已绑定
    pub fn is_resolved(&self) -> bool {
        self.data_type.is_some() && self.args.iter().all(|arg| arg.is_resolved())
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        let same_function = match (&self.descriptor, &other.descriptor) {
            (Some(a), Some(b)) => a.same_method(b),
            _ => self.name.eq_ignore_ascii_case(&other.name),
        };
        same_function && self.implicit == other.implicit && self.args == other.args
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.implicit.hash(state);
        self.args.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i32) -> Expression {
        Expression::Constant(Constant::new(value))
    }

    fn convert_to_long() -> FunctionDescriptor {
        FunctionDescriptor::new(Arc::new(FunctionMethod::new(
            CONVERT,
            vec![DataType::Integer, DataType::String],
            DataType::Long,
        )))
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Function::new("+", vec![int(3), int(2)]);
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_arg(0, int(5)).expect("下标合法");
        assert_eq!(original.arg(0), Some(&int(3)));
        assert_eq!(copy.arg(0), Some(&int(5)));
        assert_ne!(copy, original);
    }

    #[test]
    fn test_insert_conversion() {
        let mut function = Function::new("+", vec![int(3), int(2)]);
        function
            .insert_conversion(1, convert_to_long())
            .expect("下标合法");

        let Some(Expression::Function(conversion)) = function.arg(1) else {
            panic!("应为转换函数");
        };
        assert!(conversion.is_implicit());
        assert_eq!(conversion.name(), CONVERT);
        assert_eq!(conversion.data_type(), Some(&DataType::Long));
        assert_eq!(conversion.arg(0), Some(&int(2)));
        assert_eq!(
            conversion.arg(1),
            Some(&Expression::Constant(Constant::new("long")))
        );
        assert!(function.insert_conversion(5, convert_to_long()).is_err());
    }

    #[test]
    fn test_equality_prefers_descriptor() {
        let method = Arc::new(FunctionMethod::new("concat", vec![], DataType::String));
        let other_method = Arc::new(FunctionMethod::new("concat", vec![], DataType::String));

        let mut a = Function::new("concat", vec![]);
        let mut b = Function::new("CONCAT", vec![]);
        assert_eq!(a, b);

        a.set_descriptor(FunctionDescriptor::new(method.clone()));
        b.set_descriptor(FunctionDescriptor::new(method));
        assert_eq!(a, b);

        b.set_descriptor(FunctionDescriptor::new(other_method));
        assert_ne!(a, b);
    }

    #[test]
    fn test_implicit_flag_affects_equality() {
        let a = Function::new("f", vec![int(1)]);
        let mut b = a.clone();
        b.set_implicit(true);
        assert_ne!(a, b);
    }

    #[test]
    fn test_resolution() {
        let mut function = Function::new("+", vec![int(1), int(2)]);
        assert!(!function.is_resolved());
        function.set_type(DataType::Integer);
        assert!(function.is_resolved());
        assert_eq!(Expression::Function(function).get_type(), Some(DataType::Integer));
    }
}
