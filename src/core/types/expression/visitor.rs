//! 访问者分派协议
//!
//! 本模块提供节点遍历的唯一机制：
//! - `LanguageVisitor`: 每个具体节点类型一个回调方法，默认什么也不做
//! - `LanguageObject`: 节点的 `accept_visitor`，回调对应类型的方法
//! - `LanguageObjectRef`: 所有可访问节点的借用视图，供导航器统一处理子节点
//! - `PreOrderNavigator` / `PostOrderNavigator`: 驱动任意访问者走完整棵树
//!
//! 导航器默认不进入子查询命令，`do_visit_deep` 才会进入。

use super::criteria::{
    CompareCriteria, CompoundCriteria, Criteria, ExpressionCriteria, IsNullCriteria, NotCriteria,
};
use super::{
    AggregateSymbol, AliasSymbol, Array, CaseExpression, Constant, DerivedColumn, ElementSymbol,
    Expression, ExpressionSymbol, Function, GroupSymbol, MultipleElementSymbol, OrderBy, Query,
    Reference, ScalarSubquery, SearchedCaseExpression, WindowFunction, WindowSpecification,
    XmlAttributes, XmlCast, XmlElement, XmlExists, XmlForest, XmlNamespaces, XmlParse, XmlQuery,
    XmlSerialize,
};
use super::case::AbstractCaseExpression;

/// 语言访问者
///
/// 外部处理（解析、渲染、校验、改写）都实现为访问者。
/// 只需覆盖关心的节点类型，其余方法默认为空。
#[allow(unused_variables)]
pub trait LanguageVisitor {
    fn visit_constant(&mut self, obj: &Constant) {}
    fn visit_element_symbol(&mut self, obj: &ElementSymbol) {}
    fn visit_group_symbol(&mut self, obj: &GroupSymbol) {}
    fn visit_reference(&mut self, obj: &Reference) {}
    fn visit_function(&mut self, obj: &Function) {}
    fn visit_aggregate_symbol(&mut self, obj: &AggregateSymbol) {}
    fn visit_window_function(&mut self, obj: &WindowFunction) {}
    fn visit_window_specification(&mut self, obj: &WindowSpecification) {}
    fn visit_order_by(&mut self, obj: &OrderBy) {}
    fn visit_array(&mut self, obj: &Array) {}
    fn visit_case_expression(&mut self, obj: &CaseExpression) {}
    fn visit_searched_case_expression(&mut self, obj: &SearchedCaseExpression) {}
    fn visit_scalar_subquery(&mut self, obj: &ScalarSubquery) {}
    fn visit_alias_symbol(&mut self, obj: &AliasSymbol) {}
    fn visit_expression_symbol(&mut self, obj: &ExpressionSymbol) {}
    fn visit_multiple_element_symbol(&mut self, obj: &MultipleElementSymbol) {}
    fn visit_xml_element(&mut self, obj: &XmlElement) {}
    fn visit_xml_forest(&mut self, obj: &XmlForest) {}
    fn visit_xml_attributes(&mut self, obj: &XmlAttributes) {}
    fn visit_xml_namespaces(&mut self, obj: &XmlNamespaces) {}
    fn visit_xml_query(&mut self, obj: &XmlQuery) {}
    fn visit_xml_cast(&mut self, obj: &XmlCast) {}
    fn visit_xml_parse(&mut self, obj: &XmlParse) {}
    fn visit_xml_serialize(&mut self, obj: &XmlSerialize) {}
    fn visit_xml_exists(&mut self, obj: &XmlExists) {}
    fn visit_derived_column(&mut self, obj: &DerivedColumn) {}
    fn visit_query(&mut self, obj: &Query) {}
    fn visit_compare_criteria(&mut self, obj: &CompareCriteria) {}
    fn visit_is_null_criteria(&mut self, obj: &IsNullCriteria) {}
    fn visit_compound_criteria(&mut self, obj: &CompoundCriteria) {}
    fn visit_not_criteria(&mut self, obj: &NotCriteria) {}
    fn visit_expression_criteria(&mut self, obj: &ExpressionCriteria) {}

    /// 检查导航器是否应该继续访问
    fn should_continue(&self) -> bool {
        true
    }
}

/// 可被访问的节点
pub trait LanguageObject {
    fn accept_visitor(&self, visitor: &mut dyn LanguageVisitor);
}

macro_rules! impl_language_object {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl LanguageObject for $ty {
                fn accept_visitor(&self, visitor: &mut dyn LanguageVisitor) {
                    visitor.$method(self);
                }
            }
        )*
    };
}

impl_language_object! {
    Constant => visit_constant,
    ElementSymbol => visit_element_symbol,
    GroupSymbol => visit_group_symbol,
    Reference => visit_reference,
    Function => visit_function,
    AggregateSymbol => visit_aggregate_symbol,
    WindowFunction => visit_window_function,
    WindowSpecification => visit_window_specification,
    OrderBy => visit_order_by,
    Array => visit_array,
    CaseExpression => visit_case_expression,
    SearchedCaseExpression => visit_searched_case_expression,
    ScalarSubquery => visit_scalar_subquery,
    AliasSymbol => visit_alias_symbol,
    ExpressionSymbol => visit_expression_symbol,
    MultipleElementSymbol => visit_multiple_element_symbol,
    XmlElement => visit_xml_element,
    XmlForest => visit_xml_forest,
    XmlAttributes => visit_xml_attributes,
    XmlNamespaces => visit_xml_namespaces,
    XmlQuery => visit_xml_query,
    XmlCast => visit_xml_cast,
    XmlParse => visit_xml_parse,
    XmlSerialize => visit_xml_serialize,
    XmlExists => visit_xml_exists,
    DerivedColumn => visit_derived_column,
    Query => visit_query,
    CompareCriteria => visit_compare_criteria,
    IsNullCriteria => visit_is_null_criteria,
    CompoundCriteria => visit_compound_criteria,
    NotCriteria => visit_not_criteria,
    ExpressionCriteria => visit_expression_criteria,
}

impl LanguageObject for Expression {
    fn accept_visitor(&self, visitor: &mut dyn LanguageVisitor) {
        LanguageObjectRef::from(self).accept_visitor(visitor);
    }
}

impl LanguageObject for Criteria {
    fn accept_visitor(&self, visitor: &mut dyn LanguageVisitor) {
        LanguageObjectRef::from(self).accept_visitor(visitor);
    }
}

/// 可访问节点的借用视图
#[derive(Debug, Clone, Copy)]
pub enum LanguageObjectRef<'a> {
    Constant(&'a Constant),
    ElementSymbol(&'a ElementSymbol),
    GroupSymbol(&'a GroupSymbol),
    Reference(&'a Reference),
    Function(&'a Function),
    AggregateSymbol(&'a AggregateSymbol),
    WindowFunction(&'a WindowFunction),
    WindowSpecification(&'a WindowSpecification),
    OrderBy(&'a OrderBy),
    Array(&'a Array),
    CaseExpression(&'a CaseExpression),
    SearchedCaseExpression(&'a SearchedCaseExpression),
    ScalarSubquery(&'a ScalarSubquery),
    AliasSymbol(&'a AliasSymbol),
    ExpressionSymbol(&'a ExpressionSymbol),
    MultipleElementSymbol(&'a MultipleElementSymbol),
    XmlElement(&'a XmlElement),
    XmlForest(&'a XmlForest),
    XmlAttributes(&'a XmlAttributes),
    XmlNamespaces(&'a XmlNamespaces),
    XmlQuery(&'a XmlQuery),
    XmlCast(&'a XmlCast),
    XmlParse(&'a XmlParse),
    XmlSerialize(&'a XmlSerialize),
    XmlExists(&'a XmlExists),
    DerivedColumn(&'a DerivedColumn),
    Query(&'a Query),
    CompareCriteria(&'a CompareCriteria),
    IsNullCriteria(&'a IsNullCriteria),
    CompoundCriteria(&'a CompoundCriteria),
    NotCriteria(&'a NotCriteria),
    ExpressionCriteria(&'a ExpressionCriteria),
}

macro_rules! impl_from_ref {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for LanguageObjectRef<'a> {
                fn from(obj: &'a $ty) -> Self {
                    LanguageObjectRef::$ty(obj)
                }
            }
        )*
    };
}

impl_from_ref!(
    Constant,
    ElementSymbol,
    GroupSymbol,
    Reference,
    Function,
    AggregateSymbol,
    WindowFunction,
    WindowSpecification,
    OrderBy,
    Array,
    CaseExpression,
    SearchedCaseExpression,
    ScalarSubquery,
    AliasSymbol,
    ExpressionSymbol,
    MultipleElementSymbol,
    XmlElement,
    XmlForest,
    XmlAttributes,
    XmlNamespaces,
    XmlQuery,
    XmlCast,
    XmlParse,
    XmlSerialize,
    XmlExists,
    DerivedColumn,
    Query,
    CompareCriteria,
    IsNullCriteria,
    CompoundCriteria,
    NotCriteria,
    ExpressionCriteria,
);

impl<'a> From<&'a Expression> for LanguageObjectRef<'a> {
    fn from(expression: &'a Expression) -> Self {
        match expression {
            Expression::Constant(e) => LanguageObjectRef::Constant(e),
            Expression::ElementSymbol(e) => LanguageObjectRef::ElementSymbol(e),
            Expression::Reference(e) => LanguageObjectRef::Reference(e),
            Expression::Function(e) => LanguageObjectRef::Function(e),
            Expression::AggregateSymbol(e) => LanguageObjectRef::AggregateSymbol(e),
            Expression::WindowFunction(e) => LanguageObjectRef::WindowFunction(e),
            Expression::Array(e) => LanguageObjectRef::Array(e),
            Expression::CaseExpression(e) => LanguageObjectRef::CaseExpression(e),
            Expression::SearchedCaseExpression(e) => LanguageObjectRef::SearchedCaseExpression(e),
            Expression::ScalarSubquery(e) => LanguageObjectRef::ScalarSubquery(e),
            Expression::AliasSymbol(e) => LanguageObjectRef::AliasSymbol(e),
            Expression::ExpressionSymbol(e) => LanguageObjectRef::ExpressionSymbol(e),
            Expression::MultipleElementSymbol(e) => LanguageObjectRef::MultipleElementSymbol(e),
            Expression::XmlElement(e) => LanguageObjectRef::XmlElement(e),
            Expression::XmlForest(e) => LanguageObjectRef::XmlForest(e),
            Expression::XmlQuery(e) => LanguageObjectRef::XmlQuery(e),
            Expression::XmlCast(e) => LanguageObjectRef::XmlCast(e),
            Expression::XmlParse(e) => LanguageObjectRef::XmlParse(e),
            Expression::XmlSerialize(e) => LanguageObjectRef::XmlSerialize(e),
            Expression::XmlExists(e) => LanguageObjectRef::XmlExists(e),
        }
    }
}

impl<'a> From<&'a Criteria> for LanguageObjectRef<'a> {
    fn from(criteria: &'a Criteria) -> Self {
        match criteria {
            Criteria::Compare(c) => LanguageObjectRef::CompareCriteria(c),
            Criteria::IsNull(c) => LanguageObjectRef::IsNullCriteria(c),
            Criteria::Compound(c) => LanguageObjectRef::CompoundCriteria(c),
            Criteria::Not(c) => LanguageObjectRef::NotCriteria(c),
            Criteria::Expression(c) => LanguageObjectRef::ExpressionCriteria(c),
        }
    }
}

impl<'a> LanguageObjectRef<'a> {
    pub fn accept_visitor(&self, visitor: &mut dyn LanguageVisitor) {
        match *self {
            LanguageObjectRef::Constant(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::ElementSymbol(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::GroupSymbol(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::Reference(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::Function(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::AggregateSymbol(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::WindowFunction(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::WindowSpecification(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::OrderBy(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::Array(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::CaseExpression(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::SearchedCaseExpression(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::ScalarSubquery(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::AliasSymbol(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::ExpressionSymbol(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::MultipleElementSymbol(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::XmlElement(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::XmlForest(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::XmlAttributes(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::XmlNamespaces(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::XmlQuery(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::XmlCast(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::XmlParse(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::XmlSerialize(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::XmlExists(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::DerivedColumn(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::Query(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::CompareCriteria(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::IsNullCriteria(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::CompoundCriteria(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::NotCriteria(obj) => obj.accept_visitor(visitor),
            LanguageObjectRef::ExpressionCriteria(obj) => obj.accept_visitor(visitor),
        }
    }

    /// 直接子节点，按渲染顺序排列
    ///
    /// `deep` 为 false 时不进入标量子查询的命令。
    pub fn children(&self, deep: bool) -> Vec<LanguageObjectRef<'a>> {
        let mut children: Vec<LanguageObjectRef<'a>> = Vec::new();
        match *self {
            LanguageObjectRef::Constant(_)
            | LanguageObjectRef::ElementSymbol(_)
            | LanguageObjectRef::GroupSymbol(_)
            | LanguageObjectRef::Reference(_)
            | LanguageObjectRef::XmlNamespaces(_) => {}
            LanguageObjectRef::Function(obj) => {
                children.extend(obj.args().iter().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::AggregateSymbol(obj) => {
                children.extend(obj.expression().map(LanguageObjectRef::from));
                children.extend(obj.order_by().map(LanguageObjectRef::from));
                children.extend(obj.condition().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::WindowFunction(obj) => {
                children.push(LanguageObjectRef::from(obj.function()));
                children.push(LanguageObjectRef::from(obj.window_specification()));
            }
            LanguageObjectRef::WindowSpecification(obj) => {
                children.extend(obj.partition.iter().map(LanguageObjectRef::from));
                children.extend(obj.order_by.as_ref().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::OrderBy(obj) => {
                children.extend(
                    obj.items()
                        .iter()
                        .map(|item| LanguageObjectRef::from(&item.expression)),
                );
            }
            LanguageObjectRef::Array(obj) => {
                children.extend(obj.expressions().iter().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::CaseExpression(obj) => {
                children.push(LanguageObjectRef::from(obj.expression()));
                for (when, then) in obj.when().iter().zip(obj.then_expressions()) {
                    children.push(LanguageObjectRef::from(when));
                    children.push(LanguageObjectRef::from(then));
                }
                children.extend(obj.else_expression().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::SearchedCaseExpression(obj) => {
                for (when, then) in obj.when().iter().zip(obj.then_expressions()) {
                    children.push(LanguageObjectRef::from(when));
                    children.push(LanguageObjectRef::from(then));
                }
                children.extend(obj.else_expression().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::ScalarSubquery(obj) => {
                if deep {
                    children.push(LanguageObjectRef::from(obj.command()));
                }
            }
            LanguageObjectRef::AliasSymbol(obj) => {
                children.push(LanguageObjectRef::from(obj.symbol()));
            }
            LanguageObjectRef::ExpressionSymbol(obj) => {
                children.push(LanguageObjectRef::from(obj.expression()));
            }
            LanguageObjectRef::MultipleElementSymbol(obj) => {
                children.extend(obj.group().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::XmlElement(obj) => {
                children.extend(obj.namespaces.as_ref().map(LanguageObjectRef::from));
                children.extend(obj.attributes.as_ref().map(LanguageObjectRef::from));
                children.extend(obj.content.iter().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::XmlForest(obj) => {
                children.extend(obj.namespaces.as_ref().map(LanguageObjectRef::from));
                children.extend(obj.args.iter().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::XmlAttributes(obj) => {
                children.extend(obj.args.iter().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::XmlQuery(obj) => {
                children.extend(obj.namespaces.as_ref().map(LanguageObjectRef::from));
                children.extend(obj.passing.iter().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::XmlCast(obj) => {
                children.push(LanguageObjectRef::from(obj.expression.as_ref()));
            }
            LanguageObjectRef::XmlParse(obj) => {
                children.push(LanguageObjectRef::from(obj.expression.as_ref()));
            }
            LanguageObjectRef::XmlSerialize(obj) => {
                children.push(LanguageObjectRef::from(obj.expression.as_ref()));
            }
            LanguageObjectRef::XmlExists(obj) => {
                children.push(LanguageObjectRef::from(&obj.xml_query));
            }
            LanguageObjectRef::DerivedColumn(obj) => {
                children.push(LanguageObjectRef::from(obj.expression()));
            }
            LanguageObjectRef::Query(obj) => {
                children.extend(obj.select.iter().map(LanguageObjectRef::from));
                children.extend(obj.from.iter().map(LanguageObjectRef::from));
                children.extend(obj.criteria.as_ref().map(LanguageObjectRef::from));
                children.extend(obj.order_by.as_ref().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::CompareCriteria(obj) => {
                children.push(LanguageObjectRef::from(&obj.left));
                children.push(LanguageObjectRef::from(&obj.right));
            }
            LanguageObjectRef::IsNullCriteria(obj) => {
                children.push(LanguageObjectRef::from(&obj.expression));
            }
            LanguageObjectRef::CompoundCriteria(obj) => {
                children.extend(obj.criteria.iter().map(LanguageObjectRef::from));
            }
            LanguageObjectRef::NotCriteria(obj) => {
                children.push(LanguageObjectRef::from(obj.criteria.as_ref()));
            }
            LanguageObjectRef::ExpressionCriteria(obj) => {
                children.push(LanguageObjectRef::from(&obj.expression));
            }
        }
        children
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Pre,
    Post,
}

fn navigate(
    object: LanguageObjectRef<'_>,
    visitor: &mut dyn LanguageVisitor,
    order: Order,
    deep: bool,
) {
    if !visitor.should_continue() {
        return;
    }
    if order == Order::Pre {
        object.accept_visitor(visitor);
    }
    for child in object.children(deep) {
        if !visitor.should_continue() {
            return;
        }
        navigate(child, visitor, order, deep);
    }
    if order == Order::Post && visitor.should_continue() {
        object.accept_visitor(visitor);
    }
}

/// 先访问节点再访问子节点
pub struct PreOrderNavigator;

impl PreOrderNavigator {
    /// 遍历整棵树，不进入子查询
    pub fn do_visit<'a>(
        object: impl Into<LanguageObjectRef<'a>>,
        visitor: &mut dyn LanguageVisitor,
    ) {
        navigate(object.into(), visitor, Order::Pre, false);
    }

    /// 遍历整棵树，包括子查询命令
    pub fn do_visit_deep<'a>(
        object: impl Into<LanguageObjectRef<'a>>,
        visitor: &mut dyn LanguageVisitor,
    ) {
        navigate(object.into(), visitor, Order::Pre, true);
    }
}

/// 先访问子节点再访问节点
pub struct PostOrderNavigator;

impl PostOrderNavigator {
    pub fn do_visit<'a>(
        object: impl Into<LanguageObjectRef<'a>>,
        visitor: &mut dyn LanguageVisitor,
    ) {
        navigate(object.into(), visitor, Order::Post, false);
    }

    pub fn do_visit_deep<'a>(
        object: impl Into<LanguageObjectRef<'a>>,
        visitor: &mut dyn LanguageVisitor,
    ) {
        navigate(object.into(), visitor, Order::Post, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::expression::CompareOperator;

    #[derive(Default)]
    struct TraceVisitor {
        trace: Vec<String>,
        limit: Option<usize>,
    }

    impl LanguageVisitor for TraceVisitor {
        fn visit_constant(&mut self, obj: &Constant) {
            self.trace.push(obj.value().to_string());
        }

        fn visit_element_symbol(&mut self, obj: &ElementSymbol) {
            self.trace.push(obj.name());
        }

        fn visit_function(&mut self, obj: &Function) {
            self.trace.push(obj.name().to_string());
        }

        fn visit_compare_criteria(&mut self, obj: &CompareCriteria) {
            self.trace.push(obj.operator.to_string());
        }

        fn visit_query(&mut self, _obj: &Query) {
            self.trace.push("SELECT".to_string());
        }

        fn should_continue(&self) -> bool {
            self.limit.map_or(true, |limit| self.trace.len() < limit)
        }
    }

    fn sample() -> Expression {
        Expression::function(
            "+",
            vec![Expression::element("g.e1"), Expression::constant(2)],
        )
    }

    #[test]
    fn test_accept_visitor_dispatches_single_method() {
        let mut visitor = TraceVisitor::default();
        sample().accept_visitor(&mut visitor);
        assert_eq!(visitor.trace, vec!["+"]);
    }

    #[test]
    fn test_pre_and_post_order() {
        let expression = sample();
        let mut pre = TraceVisitor::default();
        PreOrderNavigator::do_visit(&expression, &mut pre);
        assert_eq!(pre.trace, vec!["+", "g.e1", "2"]);

        let mut post = TraceVisitor::default();
        PostOrderNavigator::do_visit(&expression, &mut post);
        assert_eq!(post.trace, vec!["g.e1", "2", "+"]);
    }

    #[test]
    fn test_stop_visiting() {
        let mut visitor = TraceVisitor {
            limit: Some(1),
            ..Default::default()
        };
        PreOrderNavigator::do_visit(&sample(), &mut visitor);
        assert_eq!(visitor.trace, vec!["+"]);
    }

    #[test]
    fn test_subquery_only_entered_when_deep() {
        let query = Query::new(vec![Expression::element("e2")]).with_criteria(Criteria::compare(
            Expression::element("e3"),
            CompareOperator::Eq,
            Expression::constant(1),
        ));
        let expression = Expression::scalar_subquery(query);

        let mut shallow = TraceVisitor::default();
        PreOrderNavigator::do_visit(&expression, &mut shallow);
        assert!(shallow.trace.is_empty());

        let mut deep = TraceVisitor::default();
        PreOrderNavigator::do_visit_deep(&expression, &mut deep);
        assert_eq!(deep.trace, vec!["SELECT", "e2", "=", "e3", "1"]);
    }
}
