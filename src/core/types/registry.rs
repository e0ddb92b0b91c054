//! 类型注册表
//!
//! 表达式模型依赖的外部协作方接口：值的规范化、值到运行时类型的归类、
//! 合法类型集合、以及名称的大小写规范化。`RuntimeTypeRegistry` 是默认实现，
//! 不持有任何状态。

use super::{DataType, SIMPLE_TYPES};
use crate::core::value::{ArrayValue, Value};

/// 类型注册表接口
pub trait TypeRegistry: Send + Sync {
    /// 规范化值（浮点 `-0.0` 归为 `0.0`，数组逐元素规范化）
    fn normalize(&self, value: Value) -> Value;

    /// 值对应的运行时类型，未知值归类为 `object`，NULL 归类为 `null`
    fn classify(&self, value: &Value) -> DataType;

    /// 检查是否为合法的运行时类型
    fn is_legal_type(&self, data_type: &DataType) -> bool;

    /// 名称的规范形式（大小写折叠）
    fn canonicalize_string(&self, s: &str) -> String;

    /// 类型名称
    fn type_name(&self, data_type: &DataType) -> String {
        data_type.name().into_owned()
    }

    /// 根据名称查找类型
    fn type_from_name(&self, name: &str) -> Option<DataType> {
        DataType::from_name(name)
    }
}

/// 默认运行时类型注册表
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeTypeRegistry;

/// 进程级默认注册表
pub static RUNTIME_TYPES: RuntimeTypeRegistry = RuntimeTypeRegistry;

impl TypeRegistry for RuntimeTypeRegistry {
    fn normalize(&self, value: Value) -> Value {
        match value {
            Value::Float(f) if f == 0.0 => Value::Float(0.0),
            Value::Double(f) if f == 0.0 => Value::Double(0.0),
            Value::Array(array) => {
                let zero_based = array.is_zero_based();
                let values = array
                    .values()
                    .iter()
                    .cloned()
                    .map(|v| self.normalize(v))
                    .collect();
                if zero_based {
                    Value::Array(ArrayValue::zero_based(values))
                } else {
                    Value::Array(ArrayValue::new(values))
                }
            }
            other => other,
        }
    }

    fn classify(&self, value: &Value) -> DataType {
        value.data_type()
    }

    fn is_legal_type(&self, data_type: &DataType) -> bool {
        match data_type {
            DataType::Array(component) => {
                **component != DataType::Null && self.is_legal_type(component)
            }
            other => SIMPLE_TYPES.contains(other),
        }
    }

    fn canonicalize_string(&self, s: &str) -> String {
        s.to_uppercase()
    }
}
