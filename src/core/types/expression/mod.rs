//! 表达式与符号模型
//!
//! 本模块定义查询引擎中的统一表达式类型 `Expression` 以及它引用的全部节点。
//!
//! ## 设计说明
//!
//! - **闭合和类型**: 每个变体包装一个独立结构体，访问者按变体分派，没有运行时类型检查
//! - **能力 trait**: `Typed`、`DerivedExpression`、`ContextReference`、`SubqueryContainer`
//!   只由需要它们的节点实现
//! - **身份**: 相等与哈希按各节点自己的键计算，例如列引用按分组加短名，分组按模式加短名
//! - **克隆**: 深拷贝，共享的只有元数据句柄、函数描述和约束
//!
//! ## 变体说明
//!
//! | 变体 | 用途 |
//! |------|------|
//! | `Constant` | 字面量 |
//! | `ElementSymbol` | 列引用 |
//! | `Reference` | 绑定参数或相关引用 |
//! | `Function` | 函数调用，包括隐式类型转换 |
//! | `AggregateSymbol` | 聚合函数 |
//! | `WindowFunction` | 带窗口规格的聚合 |
//! | `Array` | 数组构造 |
//! | `CaseExpression` / `SearchedCaseExpression` | 两种 CASE |
//! | `ScalarSubquery` | 标量子查询 |
//! | `AliasSymbol` / `ExpressionSymbol` | 命名包装 |
//! | `MultipleElementSymbol` | `*` / `group.*` |
//! | `Xml*` | SQL/XML 构造 |
//!
//! ## 使用示例
//!
//! ```rust
//! use sqlsymbol::core::types::expression::{Expression, Typed};
//! use sqlsymbol::core::types::DataType;
//!
//! let sum = Expression::aggregate("SUM", false, Some(Expression::constant(1_i64))).unwrap();
//! assert_eq!(sum.get_type(), Some(DataType::Long));
//! ```

mod aggregate;
mod alias;
mod array;
mod capability;
mod case;
pub mod constant;
mod constructors;
mod criteria;
mod def;
mod derived_column;
mod display;
mod element_symbol;
mod function;
mod group_symbol;
mod inspection;
mod order_by;
mod query;
mod reference;
mod subquery;
mod symbol;
mod traverse;
pub mod type_deduce;
mod visitor;
mod window;
mod xml;

// 统一导出
pub use aggregate::{AggregateFunction, AggregateSymbol};
pub use alias::{AliasSymbol, ExpressionSymbol, MultipleElementSymbol};
pub use array::Array;
pub use capability::{ContextReference, DerivedExpression, SubqueryContainer, Typed};
pub use case::{AbstractCaseExpression, CaseBase, CaseExpression, SearchedCaseExpression};
pub use constant::{install_type_checks, Constant};
pub use criteria::{
    CompareCriteria, CompareOperator, CompoundCriteria, CompoundOperator, Criteria,
    ExpressionCriteria, IsNullCriteria, NotCriteria,
};
pub use def::Expression;
pub use derived_column::DerivedColumn;
pub use element_symbol::{DisplayMode, ElementSymbol};
pub use function::{Determinism, Function, FunctionDescriptor, FunctionMethod, CONVERT};
pub use group_symbol::{GroupSymbol, TEMP_GROUP_PREFIX};
pub use order_by::{NullOrdering, OrderBy, OrderByItem};
pub use query::Query;
pub use reference::{Constraint, Reference, ReferenceTarget};
pub use subquery::{ScalarSubquery, SubqueryHint};
pub use symbol::{Symbol, SEPARATOR};
pub use type_deduce::{lookup_promotion, AVG_TYPES, SUM_TYPES};
pub use visitor::{
    LanguageObject, LanguageObjectRef, LanguageVisitor, PostOrderNavigator, PreOrderNavigator,
};
pub use window::{FrameBound, FrameMode, WindowFrame, WindowFunction, WindowSpecification};
pub use xml::{
    NamespaceItem, XmlAttributes, XmlCast, XmlElement, XmlExists, XmlForest, XmlNamespaces,
    XmlParse, XmlQuery, XmlSerialize,
};
