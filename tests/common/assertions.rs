//! 自定义断言辅助模块
//!
//! 提供测试中的常用断言函数

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use sqlsymbol::core::error::{ExpressionErrorType, ExpressionResult};

/// 断言结果成功，返回内部值
pub fn assert_ok<T>(result: ExpressionResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("操作应该成功, 实际错误: {}", err),
    }
}

/// 断言结果失败并且错误类型匹配
pub fn assert_err_type<T: std::fmt::Debug>(
    result: ExpressionResult<T>,
    expected: ExpressionErrorType,
) {
    let err = result.expect_err("操作应该失败");
    assert_eq!(
        err.error_type, expected,
        "错误类型不匹配: 期望 {:?}, 实际是 '{}'",
        expected, err
    );
}

/// 计算标准库哈希值
pub fn std_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// 断言两个值相等且哈希一致
pub fn assert_eq_and_hash<T: Hash + PartialEq + std::fmt::Debug>(left: &T, right: &T) {
    assert_eq!(left, right);
    assert_eq!(std_hash(left), std_hash(right), "相等的值哈希应该一致");
}
