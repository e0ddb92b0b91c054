//! 核心类型系统模块
//!
//! 包含运行时数据类型定义、类型注册表以及全部表达式/符号节点

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

pub mod expression;
pub mod metadata;
pub mod registry;

pub use metadata::{MetadataId, MetadataKind};
pub use registry::{RuntimeTypeRegistry, TypeRegistry, RUNTIME_TYPES};

/// 运行时数据类型
///
/// 每个已解析节点的 `get_type()` 都返回其中之一。`Null` 是 NULL 常量的专用类型，
/// `Object` 用于注册表不认识的值以及无法确定元素类型的数组表达式。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Null,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    BigInteger,
    Float,
    Double,
    BigDecimal,
    String,
    Char,
    Date,
    Time,
    Timestamp,
    Varbinary,
    Blob,
    Clob,
    Xml,
    Object,
    Array(Box<DataType>),
}

/// 全部非数组运行时类型
pub const SIMPLE_TYPES: [DataType; 20] = [
    DataType::Null,
    DataType::Boolean,
    DataType::Byte,
    DataType::Short,
    DataType::Integer,
    DataType::Long,
    DataType::BigInteger,
    DataType::Float,
    DataType::Double,
    DataType::BigDecimal,
    DataType::String,
    DataType::Char,
    DataType::Date,
    DataType::Time,
    DataType::Timestamp,
    DataType::Varbinary,
    DataType::Blob,
    DataType::Clob,
    DataType::Xml,
    DataType::Object,
];

impl DataType {
    /// 获取类型名称
    ///
    /// 数组类型的名称为元素类型名称加 `[]` 后缀。
    pub fn name(&self) -> Cow<'static, str> {
        let name = match self {
            DataType::Null => "null",
            DataType::Boolean => "boolean",
            DataType::Byte => "byte",
            DataType::Short => "short",
            DataType::Integer => "integer",
            DataType::Long => "long",
            DataType::BigInteger => "biginteger",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::BigDecimal => "bigdecimal",
            DataType::String => "string",
            DataType::Char => "char",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::Timestamp => "timestamp",
            DataType::Varbinary => "varbinary",
            DataType::Blob => "blob",
            DataType::Clob => "clob",
            DataType::Xml => "xml",
            DataType::Object => "object",
            DataType::Array(component) => return Cow::Owned(format!("{}[]", component.name())),
        };
        Cow::Borrowed(name)
    }

    /// 根据名称查找类型（大小写不敏感）
    pub fn from_name(name: &str) -> Option<DataType> {
        let trimmed = name.trim();
        if let Some(component) = trimmed.strip_suffix("[]") {
            return DataType::from_name(component).map(DataType::array_of);
        }
        let lower = trimmed.to_ascii_lowercase();
        SIMPLE_TYPES
            .iter()
            .find(|t| t.name() == lower.as_str())
            .cloned()
    }

    /// 创建数组类型
    pub fn array_of(component: DataType) -> DataType {
        DataType::Array(Box::new(component))
    }

    /// 数组类型的元素类型
    pub fn component_type(&self) -> Option<&DataType> {
        match self {
            DataType::Array(component) => Some(component),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, DataType::Array(_))
    }

    /// 检查是否为数值类型
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Byte
                | DataType::Short
                | DataType::Integer
                | DataType::Long
                | DataType::BigInteger
                | DataType::Float
                | DataType::Double
                | DataType::BigDecimal
        )
    }

    /// 检查是否为字符序列类型（参与补齐空格比较）
    pub fn is_character(&self) -> bool {
        matches!(self, DataType::String | DataType::Char | DataType::Clob)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
