//! 能力接口
//!
//! 由不相交的节点子集分别实现的小接口，彼此独立组合，不构成继承层次。

use super::def::Expression;
use super::query::Query;
use crate::core::types::DataType;

/// 带类型的节点
pub trait Typed {
    /// 已解析节点的类型，解析前可能为空
    fn get_type(&self) -> Option<DataType>;

    fn is_resolved(&self) -> bool {
        self.get_type().is_some()
    }
}

/// 包装单个表达式的派生节点
pub trait DerivedExpression {
    fn expression(&self) -> &Expression;
}

/// 可在上下文中被引用的节点
pub trait ContextReference {
    fn context_symbol(&self) -> Option<&str>;

    fn value_expression(&self) -> Option<&Expression> {
        None
    }
}

/// 包含子查询命令的节点
pub trait SubqueryContainer {
    fn command(&self) -> &Query;

    fn set_command(&mut self, command: Query);
}
