//! 表达式错误类型
//!
//! 包含错误类型和错误消息
//! 支持序列化/反序列化，用于跨模块传递

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 表达式错误（结构化设计）
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionError {
    /// 错误类型
    pub error_type: ExpressionErrorType,
    /// 错误消息
    pub message: String,
}

/// 表达式错误类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionErrorType {
    /// 构造参数非法（空列表、WHEN/THEN 长度不一致、别名嵌套等）
    InvalidArgument,
    /// 类型错误（比较不兼容的值）
    TypeError,
    /// 未知聚合函数
    UnknownAggregate,
    /// 无效操作（违反前置条件的调用）
    InvalidOperation,
    /// 验证错误（绑定值未通过约束）
    ValidationError,
}

impl fmt::Display for ExpressionErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionErrorType::InvalidArgument => write!(f, "参数错误"),
            ExpressionErrorType::TypeError => write!(f, "类型错误"),
            ExpressionErrorType::UnknownAggregate => write!(f, "未知聚合函数"),
            ExpressionErrorType::InvalidOperation => write!(f, "无效操作"),
            ExpressionErrorType::ValidationError => write!(f, "验证错误"),
        }
    }
}

impl ExpressionError {
    /// 创建新的表达式错误
    pub fn new(error_type: ExpressionErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }

    /// 创建参数错误
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ExpressionErrorType::InvalidArgument, message)
    }

    /// 创建类型错误
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ExpressionErrorType::TypeError, message)
    }

    /// 创建未知聚合函数错误
    pub fn unknown_aggregate(name: impl Into<String>) -> Self {
        Self::new(
            ExpressionErrorType::UnknownAggregate,
            format!("不支持的聚合函数: {}", name.into()),
        )
    }

    /// 创建无效操作错误
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::new(ExpressionErrorType::InvalidOperation, message)
    }

    /// 创建验证错误
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(ExpressionErrorType::ValidationError, message)
    }

    pub fn is_type_error(&self) -> bool {
        self.error_type == ExpressionErrorType::TypeError
    }
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_error_display() {
        let err = ExpressionError::type_error("integer 与 string 不可比较");
        assert_eq!(err.to_string(), "类型错误: integer 与 string 不可比较");
        assert!(err.is_type_error());
    }

    #[test]
    fn test_unknown_aggregate_message() {
        let err = ExpressionError::unknown_aggregate("MEDIAN");
        assert_eq!(err.error_type, ExpressionErrorType::UnknownAggregate);
        assert!(err.message.contains("MEDIAN"));
    }

    #[test]
    fn test_expression_error_serde() {
        let err = ExpressionError::invalid_argument("WHEN 列表为空");
        let json = serde_json::to_string(&err).expect("序列化失败");
        let back: ExpressionError = serde_json::from_str(&json).expect("反序列化失败");
        assert_eq!(err, back);
    }
}
