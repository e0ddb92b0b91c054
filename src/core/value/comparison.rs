//! 值的相等、哈希与排序规则
//!
//! - 浮点数按位比较，`-0.0` 与 `0.0`、所有 NaN 各自视为同一个值
//! - 大数值按去掉尾随零后的数值比较，`1.10 == 1.100`，哈希一致
//! - 排序只在同类型之间进行，不同类型比较返回类型错误，不做隐式转换
//! - 补齐空格比较模式是进程级开关，由 `ValueComparator::install` 在启动时设置一次

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use rust_decimal::Decimal;

use super::types::Value;
use crate::config::ComparisonConfig;
use crate::core::error::{ExpressionError, ExpressionResult};

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::BigInteger(a), Value::BigInteger(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_bits(*a as f64) == float_bits(*b as f64),
            (Value::Double(a), Value::Double(b)) => float_bits(*a) == float_bits(*b),
            (Value::BigDecimal(a), Value::BigDecimal(b)) => decimal_eq(a, b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Varbinary(a), Value::Varbinary(b)) => a == b,
            (Value::Xml(a), Value::Xml(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0u8.hash(state),
            Value::Boolean(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            Value::Byte(v) => {
                2u8.hash(state);
                v.hash(state);
            }
            Value::Short(v) => {
                3u8.hash(state);
                v.hash(state);
            }
            Value::Integer(v) => {
                4u8.hash(state);
                v.hash(state);
            }
            Value::Long(v) => {
                5u8.hash(state);
                v.hash(state);
            }
            Value::BigInteger(v) => {
                6u8.hash(state);
                v.hash(state);
            }
            Value::Float(v) => {
                7u8.hash(state);
                float_bits(*v as f64).hash(state);
            }
            Value::Double(v) => {
                8u8.hash(state);
                float_bits(*v).hash(state);
            }
            Value::BigDecimal(v) => {
                9u8.hash(state);
                hash_decimal(v, state);
            }
            Value::String(s) => {
                10u8.hash(state);
                s.hash(state);
            }
            Value::Char(c) => {
                11u8.hash(state);
                c.hash(state);
            }
            Value::Date(d) => {
                12u8.hash(state);
                d.hash(state);
            }
            Value::Time(t) => {
                13u8.hash(state);
                t.hash(state);
            }
            Value::Timestamp(ts) => {
                14u8.hash(state);
                ts.hash(state);
            }
            Value::Varbinary(bytes) => {
                15u8.hash(state);
                bytes.hash(state);
            }
            Value::Xml(s) => {
                16u8.hash(state);
                s.hash(state);
            }
            Value::Array(array) => {
                17u8.hash(state);
                array.hash(state);
            }
            Value::Object(obj) => {
                18u8.hash(state);
                obj.hash(state);
            }
        }
    }
}

/// 浮点数的规范位表示：所有 NaN 归一，`-0.0` 归为 `0.0`
fn float_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0_f64.to_bits()
    } else {
        f.to_bits()
    }
}

/// 大数值按去掉尾随零后的数值相等
pub(crate) fn decimal_eq(a: &Decimal, b: &Decimal) -> bool {
    a.normalize() == b.normalize()
}

/// 大数值哈希：零值固定为 0，其余按去掉尾随零后的表示哈希
pub(crate) fn hash_decimal<H: Hasher>(value: &Decimal, state: &mut H) {
    if value.is_zero() {
        0u64.hash(state);
        return;
    }
    value.normalize().serialize().hash(state);
}

static GLOBAL_COMPARATOR: OnceLock<ValueComparator> = OnceLock::new();

/// 值比较器
///
/// 常量排序与数组值排序共用的比较器。`pad_space` 打开时，字符串按补齐到相同长度后比较，
/// 即忽略尾随空格。该开关属于协作方配置，不是节点实例状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueComparator {
    pad_space: bool,
}

impl ValueComparator {
    pub const fn with_pad_space(pad_space: bool) -> Self {
        Self { pad_space }
    }

    /// 安装进程级比较模式
    ///
    /// 只有第一次调用生效，返回是否安装成功。
    pub fn install(config: &ComparisonConfig) -> bool {
        let installed = GLOBAL_COMPARATOR
            .set(ValueComparator::with_pad_space(config.pad_space))
            .is_ok();
        if installed {
            log::info!("值比较模式已安装: pad_space={}", config.pad_space);
        } else {
            log::debug!("值比较模式已安装过，忽略本次设置");
        }
        installed
    }

    /// 获取进程级比较器，未安装时为不补齐模式
    pub fn global() -> ValueComparator {
        GLOBAL_COMPARATOR.get().copied().unwrap_or_default()
    }

    pub fn pad_space(&self) -> bool {
        self.pad_space
    }

    /// 比较两个值
    ///
    /// NULL 排在任何非 NULL 值之前；其余值必须同类型，否则返回类型错误。
    pub fn compare(&self, left: &Value, right: &Value) -> ExpressionResult<Ordering> {
        match (left, right) {
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            (Value::Null, _) => Ok(Ordering::Less),
            (_, Value::Null) => Ok(Ordering::Greater),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
            (Value::Byte(a), Value::Byte(b)) => Ok(a.cmp(b)),
            (Value::Short(a), Value::Short(b)) => Ok(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Long(a), Value::Long(b)) => Ok(a.cmp(b)),
            (Value::BigInteger(a), Value::BigInteger(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Ok(a.total_cmp(b)),
            (Value::Double(a), Value::Double(b)) => Ok(a.total_cmp(b)),
            (Value::BigDecimal(a), Value::BigDecimal(b)) => Ok(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Ok(self.compare_str(a, b)),
            (Value::Char(a), Value::Char(b)) => Ok(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Ok(a.cmp(b)),
            (Value::Time(a), Value::Time(b)) => Ok(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Ok(a.cmp(b)),
            (Value::Varbinary(a), Value::Varbinary(b)) => Ok(a.cmp(b)),
            (Value::Array(a), Value::Array(b)) => a.compare_with(b, self),
            (a, b) => Err(ExpressionError::type_error(format!(
                "{} 与 {} 不可比较",
                a.data_type(),
                b.data_type()
            ))),
        }
    }

    fn compare_str(&self, left: &str, right: &str) -> Ordering {
        if self.pad_space {
            compare_padded(left, right)
        } else {
            left.cmp(right)
        }
    }
}

/// 补齐空格后比较：较短一方视为以空格补齐到相同长度
fn compare_padded(left: &str, right: &str) -> Ordering {
    let mut l = left.chars();
    let mut r = right.chars();
    loop {
        match (l.next(), r.next()) {
            (Some(a), Some(b)) => {
                if a != b {
                    return a.cmp(&b);
                }
            }
            (Some(a), None) => {
                if a != ' ' {
                    return a.cmp(&' ');
                }
            }
            (None, Some(b)) => {
                if b != ' ' {
                    return ' '.cmp(&b);
                }
            }
            (None, None) => return Ordering::Equal,
        }
    }
}
