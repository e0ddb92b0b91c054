//! 常量
//!
//! 字面量值。值在构造时经过注册表规范化，类型要么显式给出，要么从值推断。

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::config::ComparisonConfig;
use crate::core::error::{ExpressionError, ExpressionResult};
use crate::core::types::{DataType, TypeRegistry, RUNTIME_TYPES};
use crate::core::value::{ArrayValue, Value, ValueComparator};

static CHECK_CONSTANT_TYPES: OnceLock<bool> = OnceLock::new();

/// 安装非调试构建下的常量类型校验开关，只有第一次调用生效
pub fn install_type_checks(config: &ComparisonConfig) -> bool {
    CHECK_CONSTANT_TYPES
        .set(config.check_constant_types)
        .is_ok()
}

fn type_checks_enabled() -> bool {
    cfg!(debug_assertions) || CHECK_CONSTANT_TYPES.get().copied().unwrap_or(false)
}

/// 值是否可以赋给声明类型
fn is_assignable(value: &Value, data_type: &DataType) -> bool {
    if value.is_null() || *data_type == DataType::Object {
        return true;
    }
    match (value, data_type) {
        (Value::Array(array), DataType::Array(component)) => array
            .values()
            .iter()
            .all(|element| is_assignable(element, component)),
        _ => RUNTIME_TYPES.classify(value) == *data_type,
    }
}

#[derive(Debug, Clone)]
pub struct Constant {
    value: Value,
    data_type: DataType,
    multi_valued: bool,
    bind_eligible: bool,
}

impl Constant {
    /// 由值推断类型
    pub fn new(value: impl Into<Value>) -> Self {
        let value = RUNTIME_TYPES.normalize(value.into());
        let data_type = RUNTIME_TYPES.classify(&value);
        Self {
            value,
            data_type,
            multi_valued: false,
            bind_eligible: true,
        }
    }

    /// 指定类型构造
    ///
    /// 类型必须是合法运行时类型；启用校验时值还必须可赋给该类型。
    pub fn with_type(value: impl Into<Value>, data_type: DataType) -> ExpressionResult<Self> {
        if !RUNTIME_TYPES.is_legal_type(&data_type) {
            return Err(ExpressionError::invalid_argument(format!(
                "非法的常量类型: {}",
                data_type
            )));
        }
        let value = RUNTIME_TYPES.normalize(value.into());
        if type_checks_enabled() && !is_assignable(&value, &data_type) {
            return Err(ExpressionError::invalid_argument(format!(
                "值 {} 不能赋给类型 {}",
                value, data_type
            )));
        }
        Ok(Self {
            value,
            data_type,
            multi_valued: false,
            bind_eligible: true,
        })
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    /// 多值常量，类型为元素类型
    pub fn multi_valued(values: Vec<Value>, data_type: DataType) -> ExpressionResult<Self> {
        let mut constant = Self::with_type(
            Value::Array(ArrayValue::new(values)),
            DataType::array_of(data_type.clone()),
        )?;
        constant.data_type = data_type;
        constant.multi_valued = true;
        Ok(constant)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn is_multi_valued(&self) -> bool {
        self.multi_valued
    }

    pub fn is_bind_eligible(&self) -> bool {
        self.bind_eligible
    }

    pub fn set_bind_eligible(&mut self, bind_eligible: bool) {
        self.bind_eligible = bind_eligible;
    }

    /// 按进程级比较模式排序
    pub fn compare_to(&self, other: &Constant) -> ExpressionResult<Ordering> {
        self.compare_with(other, &ValueComparator::global())
    }

    pub fn compare_with(
        &self,
        other: &Constant,
        comparator: &ValueComparator,
    ) -> ExpressionResult<Ordering> {
        comparator.compare(&self.value, &other.value)
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        match (self.value.is_null(), other.value.is_null()) {
            (true, true) => true,
            (false, false) => {
                self.multi_valued == other.multi_valued && self.value == other.value
            }
            _ => false,
        }
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.value.is_null() {
            state.write_u64(0);
        } else {
            self.value.hash(state);
        }
    }
}
