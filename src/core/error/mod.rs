//! 错误处理
//!
//! 表达式模型只有同步、局部的失败：构造参数校验失败、比较时的类型不匹配，
//! 以及可以廉价检测到的前置条件违反。所有错误都直接返回给调用方，
//! 本层从不重试、从不吞掉错误、也从不记录失败日志。

pub mod expression;

pub use expression::{ExpressionError, ExpressionErrorType};

/// 表达式模型的统一结果类型
pub type ExpressionResult<T> = Result<T, ExpressionError>;
