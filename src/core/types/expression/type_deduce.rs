//! 表达式类型推导
//!
//! SUM/AVG 的类型提升表以及 `Typed` 在各节点上的实现。
//! 提升表是只读常量，不属于任何可变全局状态。

use super::capability::Typed;
use super::case::AbstractCaseExpression;
use super::{
    AggregateSymbol, AliasSymbol, Array, CaseExpression, Constant, DerivedColumn, ElementSymbol,
    Expression,
    ExpressionSymbol, Function, MultipleElementSymbol, Reference, ScalarSubquery,
    SearchedCaseExpression, WindowFunction, XmlCast, XmlElement, XmlExists, XmlForest, XmlParse,
    XmlQuery, XmlSerialize,
};
use crate::core::types::DataType;

/// SUM 的结果类型，按参数类型查表
pub const SUM_TYPES: [(DataType, DataType); 9] = [
    (DataType::Byte, DataType::Long),
    (DataType::Short, DataType::Long),
    (DataType::Integer, DataType::Long),
    (DataType::Long, DataType::Long),
    (DataType::BigInteger, DataType::BigInteger),
    (DataType::Float, DataType::Double),
    (DataType::Double, DataType::Double),
    (DataType::BigDecimal, DataType::BigDecimal),
    (DataType::Null, DataType::Null),
];

/// AVG 的结果类型，按参数类型查表
pub const AVG_TYPES: [(DataType, DataType); 9] = [
    (DataType::Byte, DataType::Double),
    (DataType::Short, DataType::Double),
    (DataType::Integer, DataType::Double),
    (DataType::Long, DataType::Double),
    (DataType::BigInteger, DataType::BigDecimal),
    (DataType::Float, DataType::Double),
    (DataType::Double, DataType::Double),
    (DataType::BigDecimal, DataType::BigDecimal),
    (DataType::Null, DataType::Null),
];

/// 在提升表中查找参数类型对应的结果类型
pub fn lookup_promotion(table: &[(DataType, DataType)], arg_type: &DataType) -> Option<DataType> {
    table
        .iter()
        .find(|(from, _)| from == arg_type)
        .map(|(_, to)| to.clone())
}

/// 所有表达式都已解析
fn all_resolved<'a>(expressions: impl IntoIterator<Item = &'a Expression>) -> bool {
    expressions.into_iter().all(|expression| expression.is_resolved())
}

fn derived_resolved(args: &[DerivedColumn]) -> bool {
    all_resolved(args.iter().map(DerivedColumn::expression))
}

impl Typed for Constant {
    fn get_type(&self) -> Option<DataType> {
        Some(self.data_type().clone())
    }

    fn is_resolved(&self) -> bool {
        true
    }
}

impl Typed for ElementSymbol {
    fn get_type(&self) -> Option<DataType> {
        self.data_type().cloned()
    }

    fn is_resolved(&self) -> bool {
        ElementSymbol::is_resolved(self)
    }
}

impl Typed for Reference {
    fn get_type(&self) -> Option<DataType> {
        self.data_type().cloned()
    }

    fn is_resolved(&self) -> bool {
        Reference::is_resolved(self)
    }
}

impl Typed for Function {
    fn get_type(&self) -> Option<DataType> {
        self.data_type().cloned()
    }

    fn is_resolved(&self) -> bool {
        Function::is_resolved(self)
    }
}

impl Typed for AggregateSymbol {
    fn get_type(&self) -> Option<DataType> {
        self.data_type()
    }

    fn is_resolved(&self) -> bool {
        AggregateSymbol::is_resolved(self)
    }
}

impl Typed for WindowFunction {
    fn get_type(&self) -> Option<DataType> {
        self.data_type()
    }

    fn is_resolved(&self) -> bool {
        let specification = self.window_specification();
        self.function().is_resolved()
            && all_resolved(&specification.partition)
            && specification.order_by.as_ref().map_or(true, |order_by| {
                all_resolved(order_by.items().iter().map(|item| &item.expression))
            })
    }
}

impl Typed for Array {
    fn get_type(&self) -> Option<DataType> {
        Some(self.data_type())
    }

    fn is_resolved(&self) -> bool {
        Array::is_resolved(self)
    }
}

impl Typed for CaseExpression {
    fn get_type(&self) -> Option<DataType> {
        self.data_type().cloned()
    }

    fn is_resolved(&self) -> bool {
        self.data_type().is_some()
            && self.expression().is_resolved()
            && all_resolved(self.when())
            && all_resolved(self.then_expressions())
            && all_resolved(self.else_expression())
    }
}

impl Typed for SearchedCaseExpression {
    fn get_type(&self) -> Option<DataType> {
        self.data_type().cloned()
    }

    fn is_resolved(&self) -> bool {
        self.data_type().is_some()
            && all_resolved(self.when().iter().flat_map(|when| when.expressions()))
            && all_resolved(self.then_expressions())
            && all_resolved(self.else_expression())
    }
}

impl Typed for ScalarSubquery {
    fn get_type(&self) -> Option<DataType> {
        self.data_type()
    }
}

impl Typed for AliasSymbol {
    fn get_type(&self) -> Option<DataType> {
        self.data_type()
    }

    fn is_resolved(&self) -> bool {
        self.symbol().is_resolved()
    }
}

impl Typed for ExpressionSymbol {
    fn get_type(&self) -> Option<DataType> {
        self.data_type()
    }

    fn is_resolved(&self) -> bool {
        self.expression().is_resolved()
    }
}

impl Typed for MultipleElementSymbol {
    fn get_type(&self) -> Option<DataType> {
        None
    }

    fn is_resolved(&self) -> bool {
        MultipleElementSymbol::is_resolved(self)
    }
}

impl Typed for XmlElement {
    fn get_type(&self) -> Option<DataType> {
        Some(DataType::Xml)
    }

    fn is_resolved(&self) -> bool {
        self.attributes
            .as_ref()
            .map_or(true, |attributes| derived_resolved(&attributes.args))
            && all_resolved(&self.content)
    }
}

impl Typed for XmlForest {
    fn get_type(&self) -> Option<DataType> {
        Some(DataType::Xml)
    }

    fn is_resolved(&self) -> bool {
        derived_resolved(&self.args)
    }
}

impl Typed for XmlQuery {
    fn get_type(&self) -> Option<DataType> {
        Some(DataType::Xml)
    }

    fn is_resolved(&self) -> bool {
        derived_resolved(&self.passing)
    }
}

impl Typed for XmlCast {
    fn get_type(&self) -> Option<DataType> {
        Some(self.data_type.clone())
    }

    fn is_resolved(&self) -> bool {
        self.expression.is_resolved()
    }
}

impl Typed for XmlParse {
    fn get_type(&self) -> Option<DataType> {
        Some(DataType::Xml)
    }

    fn is_resolved(&self) -> bool {
        self.expression.is_resolved()
    }
}

impl Typed for XmlSerialize {
    fn get_type(&self) -> Option<DataType> {
        Some(self.data_type.clone())
    }

    fn is_resolved(&self) -> bool {
        self.expression.is_resolved()
    }
}

impl Typed for XmlExists {
    fn get_type(&self) -> Option<DataType> {
        Some(DataType::Boolean)
    }

    fn is_resolved(&self) -> bool {
        self.xml_query.is_resolved()
    }
}

impl Typed for Expression {
    fn get_type(&self) -> Option<DataType> {
        match self {
            Expression::Constant(e) => e.get_type(),
            Expression::ElementSymbol(e) => e.get_type(),
            Expression::Reference(e) => e.get_type(),
            Expression::Function(e) => e.get_type(),
            Expression::AggregateSymbol(e) => e.get_type(),
            Expression::WindowFunction(e) => e.get_type(),
            Expression::Array(e) => e.get_type(),
            Expression::CaseExpression(e) => e.get_type(),
            Expression::SearchedCaseExpression(e) => e.get_type(),
            Expression::ScalarSubquery(e) => e.get_type(),
            Expression::AliasSymbol(e) => e.get_type(),
            Expression::ExpressionSymbol(e) => e.get_type(),
            Expression::MultipleElementSymbol(e) => e.get_type(),
            Expression::XmlElement(e) => e.get_type(),
            Expression::XmlForest(e) => e.get_type(),
            Expression::XmlQuery(e) => e.get_type(),
            Expression::XmlCast(e) => e.get_type(),
            Expression::XmlParse(e) => e.get_type(),
            Expression::XmlSerialize(e) => e.get_type(),
            Expression::XmlExists(e) => e.get_type(),
        }
    }

    fn is_resolved(&self) -> bool {
        match self {
            Expression::Constant(e) => e.is_resolved(),
            Expression::ElementSymbol(e) => Typed::is_resolved(e),
            Expression::Reference(e) => Typed::is_resolved(e),
            Expression::Function(e) => Typed::is_resolved(e),
            Expression::AggregateSymbol(e) => Typed::is_resolved(e),
            Expression::WindowFunction(e) => e.is_resolved(),
            Expression::Array(e) => Typed::is_resolved(e),
            Expression::CaseExpression(e) => e.is_resolved(),
            Expression::SearchedCaseExpression(e) => e.is_resolved(),
            Expression::ScalarSubquery(e) => e.is_resolved(),
            Expression::AliasSymbol(e) => e.is_resolved(),
            Expression::ExpressionSymbol(e) => e.is_resolved(),
            Expression::MultipleElementSymbol(e) => Typed::is_resolved(e),
            Expression::XmlElement(e) => e.is_resolved(),
            Expression::XmlForest(e) => e.is_resolved(),
            Expression::XmlQuery(e) => e.is_resolved(),
            Expression::XmlCast(e) => e.is_resolved(),
            Expression::XmlParse(e) => e.is_resolved(),
            Expression::XmlSerialize(e) => e.is_resolved(),
            Expression::XmlExists(e) => e.is_resolved(),
        }
    }
}
