//! 标量子查询
//!
//! 哈希码在 `new`/`set_command` 时从命令计算并缓存。通过 `command_mut`
//! 原地修改命令不会刷新缓存，需要新的哈希时重新调用 `set_command`。

use std::hash::{Hash, Hasher};

use super::capability::{ContextReference, SubqueryContainer};
use super::query::Query;
use crate::core::types::DataType;

/// 子查询优化提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubqueryHint {
    pub merge_join: bool,
    pub no_unnest: bool,
    pub dep_join: bool,
}

#[derive(Debug)]
pub struct ScalarSubquery {
    command: Box<Query>,
    data_type: Option<DataType>,
    hash: u64,
    should_evaluate: bool,
    hint: SubqueryHint,
    context_symbol: Option<String>,
}

impl ScalarSubquery {
    pub fn new(command: Query) -> Self {
        let hash = command.hash_code();
        Self {
            command: Box::new(command),
            data_type: None,
            hash,
            should_evaluate: false,
            hint: SubqueryHint::default(),
            context_symbol: None,
        }
    }

    pub fn command(&self) -> &Query {
        &self.command
    }

    /// 原地修改命令，缓存的哈希码保持不变
    pub fn command_mut(&mut self) -> &mut Query {
        &mut self.command
    }

    /// 替换命令并重新计算哈希码
    pub fn set_command(&mut self, command: Query) {
        self.hash = command.hash_code();
        self.command = Box::new(command);
    }

    /// 显式设置的类型优先，否则取命令第一个投影列的类型
    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
            .clone()
            .or_else(|| self.command.projected_type(0))
    }

    pub fn set_type(&mut self, data_type: DataType) {
        self.data_type = Some(data_type);
    }

    pub fn should_evaluate(&self) -> bool {
        self.should_evaluate
    }

    pub fn set_should_evaluate(&mut self, should_evaluate: bool) {
        self.should_evaluate = should_evaluate;
    }

    pub fn hint(&self) -> SubqueryHint {
        self.hint
    }

    pub fn set_hint(&mut self, hint: SubqueryHint) {
        self.hint = hint;
    }

    pub fn set_context_symbol(&mut self, context_symbol: Option<String>) {
        self.context_symbol = context_symbol;
    }

    pub fn hash_code(&self) -> u64 {
        self.hash
    }
}

impl Clone for ScalarSubquery {
    fn clone(&self) -> Self {
        let command = self.command.as_ref().clone();
        Self {
            hash: command.hash_code(),
            command: Box::new(command),
            data_type: self.data_type.clone(),
            should_evaluate: self.should_evaluate,
            hint: self.hint,
            context_symbol: self.context_symbol.clone(),
        }
    }
}

impl PartialEq for ScalarSubquery {
    fn eq(&self, other: &Self) -> bool {
        self.command == other.command && self.hint == other.hint
    }
}

impl Eq for ScalarSubquery {}

impl Hash for ScalarSubquery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl SubqueryContainer for ScalarSubquery {
    fn command(&self) -> &Query {
        &self.command
    }

    fn set_command(&mut self, command: Query) {
        ScalarSubquery::set_command(self, command);
    }
}

impl ContextReference for ScalarSubquery {
    fn context_symbol(&self) -> Option<&str> {
        self.context_symbol.as_deref()
    }
}
