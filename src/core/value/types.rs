use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use std::fmt;

use super::array::ArrayValue;
use crate::core::types::DataType;

/// 注册表不认识的值
///
/// 只保留类型名和文本形式，类型固定归类为 `object`。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectValue {
    pub type_name: String,
    pub repr: String,
}

impl ObjectValue {
    pub fn new(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            repr: repr.into(),
        }
    }
}

/// 运行时值
///
/// 常量节点携带的值。`PartialEq`/`Hash`/比较规则见 `comparison.rs`。
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    BigInteger(BigInt),
    Float(f32),
    Double(f64),
    BigDecimal(Decimal),
    String(String),
    Char(char),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Varbinary(Vec<u8>),
    Xml(String),
    Array(ArrayValue),
    Object(ObjectValue),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// 获取值本身对应的运行时类型
    ///
    /// 数组值的元素类型取第一个非空元素的类型，全空时为 `object`。
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Null,
            Value::Boolean(_) => DataType::Boolean,
            Value::Byte(_) => DataType::Byte,
            Value::Short(_) => DataType::Short,
            Value::Integer(_) => DataType::Integer,
            Value::Long(_) => DataType::Long,
            Value::BigInteger(_) => DataType::BigInteger,
            Value::Float(_) => DataType::Float,
            Value::Double(_) => DataType::Double,
            Value::BigDecimal(_) => DataType::BigDecimal,
            Value::String(_) => DataType::String,
            Value::Char(_) => DataType::Char,
            Value::Date(_) => DataType::Date,
            Value::Time(_) => DataType::Time,
            Value::Timestamp(_) => DataType::Timestamp,
            Value::Varbinary(_) => DataType::Varbinary,
            Value::Xml(_) => DataType::Xml,
            Value::Array(array) => DataType::array_of(array.component_type()),
            Value::Object(_) => DataType::Object,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Xml(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::BigInteger(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Double(v) => write!(f, "{:?}", v),
            Value::BigDecimal(v) => write!(f, "{}", v),
            Value::String(s) | Value::Xml(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Char(c) => write!(f, "'{}'", c),
            Value::Date(d) => write!(f, "{{d '{}'}}", d.format("%Y-%m-%d")),
            Value::Time(t) => write!(f, "{{t '{}'}}", t.format("%H:%M:%S")),
            Value::Timestamp(ts) => write!(f, "{{ts '{}'}}", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Varbinary(bytes) => {
                write!(f, "X'")?;
                for b in bytes {
                    write!(f, "{:02X}", b)?;
                }
                write!(f, "'")
            }
            Value::Array(array) => write!(f, "{}", array),
            Value::Object(obj) => write!(f, "{}", obj.repr),
        }
    }
}
