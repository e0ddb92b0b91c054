pub mod error;
pub mod murmur;
pub mod types;
pub mod value;

// 错误和结果类型
pub use error::{ExpressionError, ExpressionErrorType, ExpressionResult};

// 核心数据类型
pub use value::{ArrayValue, Value, ValueComparator};

// 表达式系统类型
pub use types::expression::Expression;
pub use types::DataType;
