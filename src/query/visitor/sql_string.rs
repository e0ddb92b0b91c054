//! SqlStringVisitor - 把节点渲染为 SQL 文本的访问器
//!
//! 节点的 `Display` 都委托到这里。隐式转换函数不出现在输出中，
//! 只渲染它包装的原始参数。

use crate::core::types::expression::{
    AbstractCaseExpression, AggregateSymbol, AliasSymbol, Array, CaseExpression, CompareCriteria,
    CompoundCriteria, Constant, Criteria, DerivedColumn, DisplayMode, ElementSymbol, Expression,
    ExpressionCriteria, ExpressionSymbol, Function, GroupSymbol, IsNullCriteria, LanguageObjectRef,
    LanguageVisitor, MultipleElementSymbol, NamespaceItem, NotCriteria, NullOrdering, OrderBy,
    Query, Reference, ReferenceTarget, ScalarSubquery, SearchedCaseExpression, Symbol,
    WindowFunction, WindowSpecification, XmlAttributes, XmlCast, XmlElement, XmlExists, XmlForest,
    XmlNamespaces, XmlParse, XmlQuery, XmlSerialize, CONVERT,
};
use crate::core::value::Value;

/// 以中缀形式渲染的二元运算符
const INFIX_OPERATORS: [&str; 5] = ["+", "-", "*", "/", "||"];

const CAST: &str = "cast";

#[derive(Debug, Default)]
pub struct SqlStringVisitor {
    parts: String,
}

impl SqlStringVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 渲染任意节点
    pub fn get_sql_string<'a>(object: impl Into<LanguageObjectRef<'a>>) -> String {
        let mut visitor = SqlStringVisitor::new();
        object.into().accept_visitor(&mut visitor);
        visitor.parts
    }

    pub fn into_string(self) -> String {
        self.parts
    }

    fn append(&mut self, text: &str) {
        self.parts.push_str(text);
    }

    fn visit_node<'a>(&mut self, object: impl Into<LanguageObjectRef<'a>>) {
        object.into().accept_visitor(self);
    }

    fn append_list<'a, I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
        &'a T: Into<LanguageObjectRef<'a>>,
    {
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                self.append(", ");
            }
            self.visit_node(item);
        }
    }

    fn append_type_name(&mut self, argument: &Expression) {
        // 转换目标类型以字符串常量保存，输出时不加引号
        match argument.as_constant().map(Constant::value) {
            Some(Value::String(type_name)) => self.append(type_name),
            _ => self.visit_node(argument),
        }
    }

    fn append_xml_query_body(&mut self, obj: &XmlQuery) {
        if let Some(namespaces) = &obj.namespaces {
            self.visit_node(namespaces);
            self.append(", ");
        }
        self.append(&Value::String(obj.xquery.clone()).to_string());
        if !obj.passing.is_empty() {
            self.append(" PASSING ");
            self.append_list(&obj.passing);
        }
    }

    fn append_criteria_operand(&mut self, criteria: &Criteria) {
        if matches!(criteria, Criteria::Compound(_)) {
            self.append("(");
            self.visit_node(criteria);
            self.append(")");
        } else {
            self.visit_node(criteria);
        }
    }
}

impl LanguageVisitor for SqlStringVisitor {
    fn visit_constant(&mut self, obj: &Constant) {
        match obj.value() {
            Value::Array(array) if obj.is_multi_valued() => {
                self.append("(");
                let rendered: Vec<String> = array.values().iter().map(Value::to_string).collect();
                self.append(&rendered.join(", "));
                self.append(")");
            }
            value => self.append(&value.to_string()),
        }
    }

    fn visit_element_symbol(&mut self, obj: &ElementSymbol) {
        let text = match obj.display_mode() {
            DisplayMode::FullyQualified => obj.name(),
            DisplayMode::OutputName => obj.output_name(),
            DisplayMode::ShortOutputName => Symbol::short_name(&obj.output_name()).to_string(),
        };
        self.append(&text);
    }

    fn visit_group_symbol(&mut self, obj: &GroupSymbol) {
        match obj.output_definition() {
            Some(definition) => {
                self.append(definition);
                self.append(" AS ");
                self.append(obj.output_name());
            }
            None => self.append(obj.output_name()),
        }
    }

    fn visit_reference(&mut self, obj: &Reference) {
        match obj.target() {
            ReferenceTarget::Positional { .. } => self.append("?"),
            ReferenceTarget::Correlated { expression } => self.visit_node(expression),
        }
    }

    fn visit_function(&mut self, obj: &Function) {
        let args = obj.args();
        if obj.is_implicit() {
            if let Some(first) = args.first() {
                self.visit_node(first);
                return;
            }
        }
        let name = obj.name();
        if args.len() == 2 && INFIX_OPERATORS.contains(&name) {
            self.append("(");
            self.visit_node(&args[0]);
            self.append(" ");
            self.append(name);
            self.append(" ");
            self.visit_node(&args[1]);
            self.append(")");
            return;
        }
        self.append(name);
        self.append("(");
        if args.len() == 2
            && (name.eq_ignore_ascii_case(CONVERT) || name.eq_ignore_ascii_case(CAST))
        {
            self.visit_node(&args[0]);
            self.append(if name.eq_ignore_ascii_case(CAST) { " AS " } else { ", " });
            self.append_type_name(&args[1]);
        } else {
            self.append_list(args);
        }
        self.append(")");
    }

    fn visit_aggregate_symbol(&mut self, obj: &AggregateSymbol) {
        self.append(obj.function().name());
        self.append("(");
        if obj.is_distinct() {
            self.append("DISTINCT ");
        }
        match obj.expression() {
            Some(expression) => self.visit_node(expression),
            None if obj.is_count_star() => self.append("*"),
            None => {}
        }
        if let Some(order_by) = obj.order_by() {
            self.append(" ");
            self.visit_node(order_by);
        }
        self.append(")");
        if let Some(condition) = obj.condition() {
            self.append(" FILTER(WHERE ");
            self.visit_node(condition);
            self.append(")");
        }
    }

    fn visit_window_function(&mut self, obj: &WindowFunction) {
        self.visit_node(obj.function());
        self.append(" OVER (");
        self.visit_node(obj.window_specification());
        self.append(")");
    }

    fn visit_window_specification(&mut self, obj: &WindowSpecification) {
        let mut need_space = false;
        if !obj.partition.is_empty() {
            self.append("PARTITION BY ");
            self.append_list(&obj.partition);
            need_space = true;
        }
        if let Some(order_by) = &obj.order_by {
            if need_space {
                self.append(" ");
            }
            self.visit_node(order_by);
            need_space = true;
        }
        if let Some(frame) = &obj.frame {
            if need_space {
                self.append(" ");
            }
            self.append(&frame.to_string());
        }
    }

    fn visit_order_by(&mut self, obj: &OrderBy) {
        self.append("ORDER BY ");
        for (index, item) in obj.items().iter().enumerate() {
            if index > 0 {
                self.append(", ");
            }
            self.visit_node(&item.expression);
            if !item.ascending {
                self.append(" DESC");
            }
            match item.null_ordering {
                Some(NullOrdering::First) => self.append(" NULLS FIRST"),
                Some(NullOrdering::Last) => self.append(" NULLS LAST"),
                None => {}
            }
        }
    }

    fn visit_array(&mut self, obj: &Array) {
        self.append("(");
        self.append_list(obj.expressions());
        if obj.expressions().len() == 1 {
            self.append(",");
        }
        self.append(")");
    }

    fn visit_case_expression(&mut self, obj: &CaseExpression) {
        self.append("CASE ");
        self.visit_node(obj.expression());
        for (when, then) in obj.when().iter().zip(obj.then_expressions()) {
            self.append(" WHEN ");
            self.visit_node(when);
            self.append(" THEN ");
            self.visit_node(then);
        }
        if let Some(else_expression) = obj.else_expression() {
            self.append(" ELSE ");
            self.visit_node(else_expression);
        }
        self.append(" END");
    }

    fn visit_searched_case_expression(&mut self, obj: &SearchedCaseExpression) {
        self.append("CASE");
        for (when, then) in obj.when().iter().zip(obj.then_expressions()) {
            self.append(" WHEN ");
            self.visit_node(when);
            self.append(" THEN ");
            self.visit_node(then);
        }
        if let Some(else_expression) = obj.else_expression() {
            self.append(" ELSE ");
            self.visit_node(else_expression);
        }
        self.append(" END");
    }

    fn visit_scalar_subquery(&mut self, obj: &ScalarSubquery) {
        self.append("(");
        self.visit_node(obj.command());
        self.append(")");
    }

    fn visit_alias_symbol(&mut self, obj: &AliasSymbol) {
        self.visit_node(obj.symbol());
        self.append(" AS ");
        self.append(obj.output_name());
    }

    fn visit_expression_symbol(&mut self, obj: &ExpressionSymbol) {
        self.visit_node(obj.expression());
    }

    fn visit_multiple_element_symbol(&mut self, obj: &MultipleElementSymbol) {
        self.append(&obj.name());
    }

    fn visit_xml_element(&mut self, obj: &XmlElement) {
        self.append("XMLELEMENT(NAME ");
        self.append(&obj.name);
        if let Some(namespaces) = &obj.namespaces {
            self.append(", ");
            self.visit_node(namespaces);
        }
        if let Some(attributes) = &obj.attributes {
            self.append(", ");
            self.visit_node(attributes);
        }
        for content in &obj.content {
            self.append(", ");
            self.visit_node(content);
        }
        self.append(")");
    }

    fn visit_xml_forest(&mut self, obj: &XmlForest) {
        self.append("XMLFOREST(");
        if let Some(namespaces) = &obj.namespaces {
            self.visit_node(namespaces);
            self.append(", ");
        }
        self.append_list(&obj.args);
        self.append(")");
    }

    fn visit_xml_attributes(&mut self, obj: &XmlAttributes) {
        self.append("XMLATTRIBUTES(");
        self.append_list(&obj.args);
        self.append(")");
    }

    fn visit_xml_namespaces(&mut self, obj: &XmlNamespaces) {
        self.append("XMLNAMESPACES(");
        for (index, item) in obj.items.iter().enumerate() {
            if index > 0 {
                self.append(", ");
            }
            match item {
                NamespaceItem::Default(uri) => {
                    self.append("DEFAULT ");
                    self.append(&Value::String(uri.clone()).to_string());
                }
                NamespaceItem::Prefixed { prefix, uri } => {
                    self.append(&Value::String(uri.clone()).to_string());
                    self.append(" AS ");
                    self.append(prefix);
                }
                NamespaceItem::NoDefault => self.append("NO DEFAULT"),
            }
        }
        self.append(")");
    }

    fn visit_xml_query(&mut self, obj: &XmlQuery) {
        self.append("XMLQUERY(");
        self.append_xml_query_body(obj);
        match obj.empty_on_empty {
            Some(true) => self.append(" EMPTY ON EMPTY"),
            Some(false) => self.append(" NULL ON EMPTY"),
            None => {}
        }
        self.append(")");
    }

    fn visit_xml_cast(&mut self, obj: &XmlCast) {
        self.append("XMLCAST(");
        self.visit_node(obj.expression.as_ref());
        self.append(" AS ");
        self.append(&obj.data_type.name());
        self.append(")");
    }

    fn visit_xml_parse(&mut self, obj: &XmlParse) {
        self.append("XMLPARSE(");
        self.append(if obj.document { "DOCUMENT " } else { "CONTENT " });
        self.visit_node(obj.expression.as_ref());
        if obj.well_formed {
            self.append(" WELLFORMED");
        }
        self.append(")");
    }

    fn visit_xml_serialize(&mut self, obj: &XmlSerialize) {
        self.append("XMLSERIALIZE(");
        match obj.document {
            Some(true) => self.append("DOCUMENT "),
            Some(false) => self.append("CONTENT "),
            None => {}
        }
        self.visit_node(obj.expression.as_ref());
        self.append(" AS ");
        self.append(&obj.data_type.name());
        if let Some(encoding) = &obj.encoding {
            self.append(" ENCODING ");
            self.append(encoding);
        }
        if let Some(version) = &obj.version {
            self.append(" VERSION ");
            self.append(&Value::String(version.clone()).to_string());
        }
        match obj.declaration {
            Some(true) => self.append(" INCLUDING XMLDECLARATION"),
            Some(false) => self.append(" EXCLUDING XMLDECLARATION"),
            None => {}
        }
        self.append(")");
    }

    fn visit_xml_exists(&mut self, obj: &XmlExists) {
        self.append("XMLEXISTS(");
        self.append_xml_query_body(&obj.xml_query);
        self.append(")");
    }

    fn visit_derived_column(&mut self, obj: &DerivedColumn) {
        self.visit_node(obj.expression());
        if let Some(alias) = obj.alias() {
            self.append(" AS ");
            self.append(alias);
        }
    }

    fn visit_query(&mut self, obj: &Query) {
        self.append("SELECT ");
        self.append_list(&obj.select);
        if !obj.from.is_empty() {
            self.append(" FROM ");
            self.append_list(&obj.from);
        }
        if let Some(criteria) = &obj.criteria {
            self.append(" WHERE ");
            self.visit_node(criteria);
        }
        if let Some(order_by) = &obj.order_by {
            self.append(" ");
            self.visit_node(order_by);
        }
    }

    fn visit_compare_criteria(&mut self, obj: &CompareCriteria) {
        self.visit_node(&obj.left);
        self.append(" ");
        self.append(obj.operator.as_str());
        self.append(" ");
        self.visit_node(&obj.right);
    }

    fn visit_is_null_criteria(&mut self, obj: &IsNullCriteria) {
        self.visit_node(&obj.expression);
        self.append(if obj.negated { " IS NOT NULL" } else { " IS NULL" });
    }

    fn visit_compound_criteria(&mut self, obj: &CompoundCriteria) {
        let separator = format!(" {} ", obj.operator);
        for (index, criteria) in obj.criteria.iter().enumerate() {
            if index > 0 {
                self.append(&separator);
            }
            self.append_criteria_operand(criteria);
        }
    }

    fn visit_not_criteria(&mut self, obj: &NotCriteria) {
        self.append("NOT (");
        self.visit_node(obj.criteria.as_ref());
        self.append(")");
    }

    fn visit_expression_criteria(&mut self, obj: &ExpressionCriteria) {
        self.visit_node(&obj.expression);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::expression::{
        CompareOperator, FrameBound, FrameMode, FunctionDescriptor, FunctionMethod,
        OrderByItem, WindowFrame,
    };
    use crate::core::types::DataType;
    use std::sync::Arc;

    fn sql(expression: &Expression) -> String {
        SqlStringVisitor::get_sql_string(expression)
    }

    #[test]
    fn test_basic_nodes() {
        assert_eq!(sql(&Expression::constant(1)), "1");
        assert_eq!(sql(&Expression::constant("a'b")), "'a''b'");
        assert_eq!(sql(&Expression::null()), "NULL");
        assert_eq!(sql(&Expression::element("g.e1")), "g.e1");
        assert_eq!(sql(&Expression::parameter(0)), "?");
        assert_eq!(sql(&Expression::all()), "*");
    }

    #[test]
    fn test_infix_and_function_calls() {
        let sum =
            Expression::function("+", vec![Expression::element("e1"), Expression::constant(2)]);
        assert_eq!(sql(&sum), "(e1 + 2)");
        let concat = Expression::function(
            "concat",
            vec![Expression::element("a"), Expression::element("b")],
        );
        assert_eq!(sql(&concat), "concat(a, b)");
    }

    #[test]
    fn test_implicit_conversion_is_hidden() {
        let mut function = Function::new("abs", vec![Expression::element("e1")]);
        let method = FunctionMethod::new(CONVERT, vec![DataType::Integer], DataType::Long);
        function
            .insert_conversion(0, FunctionDescriptor::new(Arc::new(method)))
            .expect("下标合法");
        assert_eq!(sql(&Expression::Function(function)), "abs(e1)");

        let explicit = Expression::function(
            "convert",
            vec![Expression::element("e1"), Expression::constant("long")],
        );
        assert_eq!(sql(&explicit), "convert(e1, long)");
    }

    #[test]
    fn test_aggregates_and_windows() {
        assert_eq!(sql(&Expression::count_star()), "COUNT(*)");

        let mut aggregate =
            AggregateSymbol::new("sum", true, Some(Expression::element("e1"))).expect("合法");
        aggregate.set_condition(Some(Criteria::compare(
            Expression::element("e2"),
            CompareOperator::Gt,
            Expression::constant(0),
        )));
        assert_eq!(
            sql(&Expression::AggregateSymbol(aggregate.clone())),
            "SUM(DISTINCT e1) FILTER(WHERE e2 > 0)"
        );

        let specification = WindowSpecification::new()
            .with_partition(vec![Expression::element("e3")])
            .with_order_by(OrderBy::new(vec![OrderByItem::new(Expression::element("e4"), false)]))
            .with_frame(WindowFrame::new(FrameMode::Rows, FrameBound::UnboundedPreceding));
        let window = Expression::WindowFunction(WindowFunction::new(
            AggregateSymbol::new("ROW_NUMBER", false, None).expect("合法"),
            specification,
        ));
        assert_eq!(
            sql(&window),
            "ROW_NUMBER() OVER (PARTITION BY e3 ORDER BY e4 DESC ROWS UNBOUNDED PRECEDING)"
        );
    }

    #[test]
    fn test_case_and_alias() {
        let case = Expression::case(
            Expression::element("e1"),
            vec![Expression::constant(1)],
            vec![Expression::constant("one")],
            Some(Expression::constant("other")),
        )
        .expect("合法");
        assert_eq!(sql(&case), "CASE e1 WHEN 1 THEN 'one' ELSE 'other' END");

        let alias = Expression::element("e1").alias("x").expect("合法");
        assert_eq!(sql(&alias), "e1 AS x");
    }

    #[test]
    fn test_subquery_and_criteria() {
        let query = Query::new(vec![Expression::element("e1")])
            .with_from(vec![GroupSymbol::with_definition("g", "pm1.g1")])
            .with_criteria(Criteria::and(vec![
                Criteria::is_not_null(Expression::element("e2")),
                Criteria::negate(Criteria::compare(
                    Expression::element("e3"),
                    CompareOperator::Eq,
                    Expression::constant(1),
                )),
            ]));
        assert_eq!(
            sql(&Expression::scalar_subquery(query)),
            "(SELECT e1 FROM pm1.g1 AS g WHERE e2 IS NOT NULL AND NOT (e3 = 1))"
        );
    }

    #[test]
    fn test_array() {
        assert_eq!(sql(&Expression::array(vec![Expression::constant(1)])), "(1,)");
        assert_eq!(
            sql(&Expression::array(vec![Expression::constant(1), Expression::constant(2)])),
            "(1, 2)"
        );
    }

    #[test]
    fn test_xml_nodes() {
        let element = XmlElement::new("item", vec![Expression::element("e1")])
            .with_namespaces(XmlNamespaces::new(vec![NamespaceItem::Prefixed {
                prefix: "x".to_string(),
                uri: "http://x".to_string(),
            }]))
            .with_attributes(XmlAttributes::new(vec![DerivedColumn::new(
                Some("id".to_string()),
                Expression::element("e2"),
            )]));
        assert_eq!(
            sql(&Expression::XmlElement(element)),
            "XMLELEMENT(NAME item, XMLNAMESPACES('http://x' AS x), XMLATTRIBUTES(e2 AS id), e1)"
        );

        let parse = XmlParse::new(true, Expression::element("doc"), true);
        assert_eq!(sql(&Expression::XmlParse(parse)), "XMLPARSE(DOCUMENT doc WELLFORMED)");

        let exists = XmlExists::new(XmlQuery::new(
            "/a",
            vec![DerivedColumn::new(None, Expression::element("doc"))],
        ));
        assert_eq!(sql(&Expression::XmlExists(exists)), "XMLEXISTS('/a' PASSING doc)");
    }
}
