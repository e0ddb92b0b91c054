//! Value 模块 - 运行时值
//!
//! 此模块提供常量节点携带的值，包括：
//! - 核心类型定义 (`types.rs`)
//! - 数组值 (`array.rs`)
//! - 相等、哈希与排序规则 (`comparison.rs`)
//! - 类型转换 (`conversion.rs`)

pub mod array;
pub mod comparison;
pub mod conversion;
pub mod types;

pub use array::ArrayValue;
pub use comparison::ValueComparator;
pub use types::*;
