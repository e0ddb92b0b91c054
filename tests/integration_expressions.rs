//! 表达式节点集成测试
//!
//! 测试范围:
//! - Constant - 大数值相等与哈希、NULL 与多值常量
//! - Function - 深拷贝独立性、隐式转换
//! - AggregateSymbol - SUM/AVG 类型提升与其它聚合的类型规则
//! - CaseExpression - WHEN/THEN 校验
//! - ScalarSubquery - 缓存哈希
//! - ArrayValue - 前缀比较

mod common;

use std::cmp::Ordering;

use common::assertions::{assert_eq_and_hash, assert_err_type, assert_ok};
use common::{descriptor, int, resolved_element};
use rust_decimal::Decimal;
use sqlsymbol::core::error::ExpressionErrorType;
use sqlsymbol::core::types::expression::{
    AbstractCaseExpression, AggregateSymbol, Array, CaseExpression, CompareOperator, Constant,
    Criteria, Expression, Function, Query, ScalarSubquery, SearchedCaseExpression, Typed, CONVERT,
};
use sqlsymbol::core::types::DataType;
use sqlsymbol::core::value::{ArrayValue, Value, ValueComparator};

fn typed_element(data_type: DataType) -> Expression {
    Expression::ElementSymbol(resolved_element("g", "e1", data_type))
}

// ==================== Constant 测试 ====================

#[test]
fn test_decimal_constants_ignore_scale() {
    let left = Constant::new(Decimal::new(15, 1));
    let right = Constant::new(Decimal::new(150, 2));
    assert_eq_and_hash(&left, &right);
    assert_eq!(left.compare_to(&right), Ok(Ordering::Equal));
}

#[test]
fn test_null_constant() {
    let null = Constant::null();
    assert!(null.is_null());
    assert_eq!(null.data_type(), &DataType::Null);
    assert_eq!(null, Constant::null());
    assert_ne!(null, Constant::new(0));
}

#[test]
fn test_typed_constant_validation() {
    assert_err_type(
        Constant::with_type(Value::String("abc".to_string()), DataType::Integer),
        ExpressionErrorType::InvalidArgument,
    );
    let long = assert_ok(Constant::with_type(Value::Null, DataType::Long));
    assert_eq!(long.data_type(), &DataType::Long);
}

#[test]
fn test_multi_valued_constant() {
    let constant = assert_ok(Constant::multi_valued(
        vec![Value::Integer(1), Value::Integer(2)],
        DataType::Integer,
    ));
    assert!(constant.is_multi_valued());
    assert_eq!(constant.data_type(), &DataType::Integer);
    assert_eq!(Expression::Constant(constant).to_string(), "(1, 2)");
}

// ==================== Function 测试 ====================

#[test]
fn test_function_clone_is_independent() {
    let original = Function::new("+", vec![int(3), int(2)]);
    let mut copy = original.clone();
    assert_eq!(copy, original);

    assert_ok(copy.set_arg(0, int(5)));
    assert_eq!(original.arg(0), Some(&int(3)));
    assert_eq!(copy.arg(0), Some(&int(5)));
    assert_ne!(copy, original);
}

#[test]
fn test_function_names_compare_case_insensitively() {
    let left = Function::new("CONCAT", vec![int(1)]);
    let right = Function::new("concat", vec![int(1)]);
    assert_eq_and_hash(&left, &right);
}

#[test]
fn test_insert_conversion() {
    let mut function = Function::new("abs", vec![typed_element(DataType::Integer)]);
    assert_err_type(
        function.insert_conversion(3, descriptor(CONVERT, vec![DataType::Integer], DataType::Long)),
        ExpressionErrorType::InvalidArgument,
    );

    assert_ok(function.insert_conversion(
        0,
        descriptor(CONVERT, vec![DataType::Integer], DataType::Long),
    ));
    let conversion = function.arg(0).and_then(Expression::as_function).expect("应为转换函数");
    assert!(conversion.is_implicit());
    assert_eq!(conversion.data_type(), Some(&DataType::Long));
    assert_eq!(conversion.args().len(), 2);
    assert_eq!(Expression::Function(function).to_string(), "abs(g.e1)");
}

// ==================== AggregateSymbol 测试 ====================

#[test]
fn test_sum_and_avg_promotion() {
    let sum_long =
        assert_ok(AggregateSymbol::new("SUM", false, Some(typed_element(DataType::Long))));
    assert_eq!(sum_long.get_type(), Some(DataType::Long));

    let avg_long =
        assert_ok(AggregateSymbol::new("AVG", false, Some(typed_element(DataType::Long))));
    assert_eq!(avg_long.get_type(), Some(DataType::Double));

    for name in ["SUM", "AVG"] {
        let decimal = assert_ok(AggregateSymbol::new(
            name,
            false,
            Some(typed_element(DataType::BigDecimal)),
        ));
        assert_eq!(decimal.get_type(), Some(DataType::BigDecimal));
    }

    let sum_int =
        assert_ok(AggregateSymbol::new("sum", false, Some(typed_element(DataType::Integer))));
    assert_eq!(sum_int.get_type(), Some(DataType::Long));
}

#[test]
fn test_other_aggregate_types() {
    assert_eq!(AggregateSymbol::count_star().get_type(), Some(DataType::Integer));

    let cases = [
        ("MAX", DataType::String),
        ("ARRAY_AGG", DataType::array_of(DataType::Integer)),
        ("XMLAGG", DataType::Xml),
        ("TEXTAGG", DataType::Blob),
        ("JSONARRAY_AGG", DataType::Clob),
        ("STDDEV_POP", DataType::Double),
        ("ROW_NUMBER", DataType::Integer),
    ];
    for (name, expected) in cases {
        let argument = match name {
            "MAX" => typed_element(DataType::String),
            _ => typed_element(DataType::Integer),
        };
        let aggregate = assert_ok(AggregateSymbol::new(name, false, Some(argument)));
        assert_eq!(aggregate.get_type(), Some(expected), "{}", name);
    }
}

#[test]
fn test_unknown_aggregate_name() {
    assert_err_type(
        AggregateSymbol::new("MEDIAN", false, Some(int(1))),
        ExpressionErrorType::UnknownAggregate,
    );
}

#[test]
fn test_aggregate_identity_ignores_name_case() {
    let left = assert_ok(AggregateSymbol::new("count", false, Some(int(1))));
    let right = assert_ok(AggregateSymbol::new("COUNT", false, Some(int(1))));
    assert_eq_and_hash(&left, &right);

    let distinct = assert_ok(AggregateSymbol::new("COUNT", true, Some(int(1))));
    assert_ne!(left, distinct);
}

// ==================== CASE 测试 ====================

#[test]
fn test_case_when_then_mismatch() {
    assert_err_type(
        CaseExpression::new(int(1), vec![int(1), int(2)], vec![int(3)]),
        ExpressionErrorType::InvalidArgument,
    );
    assert_err_type(
        SearchedCaseExpression::new(vec![], vec![]),
        ExpressionErrorType::InvalidArgument,
    );

    let mut case = assert_ok(CaseExpression::new(int(1), vec![int(1)], vec![int(2)]));
    assert_err_type(case.set_when(vec![int(1)], vec![]), ExpressionErrorType::InvalidArgument);
    assert_eq!(case.when_count(), 1);
}

#[test]
fn test_searched_case_accessors() {
    let when = Criteria::compare(typed_element(DataType::Integer), CompareOperator::Gt, int(0));
    let mut case = assert_ok(SearchedCaseExpression::new(vec![when.clone()], vec![int(1)]));
    case.set_else_expression(Some(int(0)));
    case.set_type(DataType::Integer);

    assert_eq!(case.when_criteria(0), Some(&when));
    assert_eq!(case.then_expression(0), Some(&int(1)));
    assert_eq!(case.else_expression(), Some(&int(0)));
    assert_eq!(case.get_type(), Some(DataType::Integer));
}

// ==================== ScalarSubquery 测试 ====================

#[test]
fn test_subquery_hash_captured_at_set_command() {
    let command = Query::new(vec![typed_element(DataType::Integer)]);
    let mut subquery = ScalarSubquery::new(Query::new(vec![int(1)]));
    subquery.set_command(command.clone());
    let captured = subquery.hash_code();

    subquery.command_mut().select.push(int(2));
    assert_eq!(subquery.hash_code(), captured);

    subquery.set_command(subquery.command().clone());
    assert_ne!(subquery.hash_code(), captured);
}

#[test]
fn test_subquery_type_from_projection() {
    let subquery = ScalarSubquery::new(Query::new(vec![typed_element(DataType::Date)]));
    assert_eq!(subquery.get_type(), Some(DataType::Date));

    let mut explicit = subquery.clone();
    explicit.set_type(DataType::String);
    assert_eq!(explicit.get_type(), Some(DataType::String));
}

// ==================== 数组测试 ====================

#[test]
fn test_array_value_prefix_ordering() {
    let comparator = ValueComparator::with_pad_space(false);
    let shorter = ArrayValue::new(vec![Value::Integer(1), Value::Integer(2)]);
    let longer = ArrayValue::new(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
    assert_eq!(shorter.compare_with(&longer, &comparator), Ok(Ordering::Less));
    assert_eq!(longer.compare_with(&shorter, &comparator), Ok(Ordering::Greater));
}

#[test]
fn test_array_expression_type() {
    let untyped = Array::new(vec![int(1)]);
    assert_eq!(untyped.get_type(), Some(DataType::Object));

    let typed = Array::with_component_type(DataType::Integer, vec![int(1), int(2)]);
    assert_eq!(typed.get_type(), Some(DataType::array_of(DataType::Integer)));
}
