//! 表达式类型定义
//!
//! 本模块定义表达式模型的闭合和类型 `Expression`。每个变体包装一个独立的节点结构体，
//! 相等与哈希由各节点按自己的身份键实现，克隆即深拷贝。

use super::aggregate::AggregateSymbol;
use super::alias::{AliasSymbol, ExpressionSymbol, MultipleElementSymbol};
use super::array::Array;
use super::case::{CaseExpression, SearchedCaseExpression};
use super::constant::Constant;
use super::element_symbol::ElementSymbol;
use super::function::Function;
use super::reference::Reference;
use super::subquery::ScalarSubquery;
use super::window::WindowFunction;
use super::xml::{XmlCast, XmlElement, XmlExists, XmlForest, XmlParse, XmlQuery, XmlSerialize};

/// 统一表达式类型
///
/// 解析器产生未解析的树，解析器原地绑定类型和元数据，
/// 之后的规划、求值和渲染都通过访问者协议遍历。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// 字面量
    Constant(Constant),

    /// 列引用
    ElementSymbol(ElementSymbol),

    /// 绑定参数或相关引用
    Reference(Reference),

    /// 函数调用
    Function(Function),

    /// 聚合函数
    AggregateSymbol(AggregateSymbol),

    /// 窗口函数
    WindowFunction(WindowFunction),

    /// 数组构造
    Array(Array),

    /// 简单 CASE
    CaseExpression(CaseExpression),

    /// 搜索型 CASE
    SearchedCaseExpression(SearchedCaseExpression),

    /// 标量子查询
    ScalarSubquery(ScalarSubquery),

    /// 别名
    AliasSymbol(AliasSymbol),

    /// 命名的匿名表达式
    ExpressionSymbol(ExpressionSymbol),

    /// `*` / `group.*`
    MultipleElementSymbol(MultipleElementSymbol),

    XmlElement(XmlElement),
    XmlForest(XmlForest),
    XmlQuery(XmlQuery),
    XmlCast(XmlCast),
    XmlParse(XmlParse),
    XmlSerialize(XmlSerialize),
    XmlExists(XmlExists),
}
