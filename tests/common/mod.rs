//! 集成测试共享工具模块
//!
//! 提供测试中常用的节点构造和断言函数

#![allow(dead_code)]

pub mod assertions;

use std::sync::Arc;

use sqlsymbol::core::types::expression::{
    ElementSymbol, Expression, FunctionDescriptor, FunctionMethod, GroupSymbol,
};
use sqlsymbol::core::types::{DataType, MetadataId};

/// 整数常量
pub fn int(value: i32) -> Expression {
    Expression::constant(value)
}

/// 已绑定分组、元数据和类型的列引用
pub fn resolved_element(group: &str, name: &str, data_type: DataType) -> ElementSymbol {
    let mut group_symbol = GroupSymbol::new(group);
    group_symbol.set_metadata_id(MetadataId::catalog(group));
    let mut element = ElementSymbol::with_group(name, group_symbol);
    element.set_metadata_id(MetadataId::catalog(format!("{}.{}", group, name)));
    element.set_type(data_type);
    element
}

/// 函数描述
pub fn descriptor(
    name: &str,
    arg_types: Vec<DataType>,
    return_type: DataType,
) -> FunctionDescriptor {
    FunctionDescriptor::new(Arc::new(FunctionMethod::new(name, arg_types, return_type)))
}
