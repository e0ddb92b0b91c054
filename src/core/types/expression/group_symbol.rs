//! 分组符号
//!
//! 表/数据源引用。名称在第一个分隔符处拆成模式名和短名；
//! 带别名时名称为别名，原始定义保存在 `definition` 中。

use std::hash::{Hash, Hasher};

use super::symbol::{Symbol, SEPARATOR};
use crate::core::types::metadata::MetadataId;

/// 临时表名前缀
pub const TEMP_GROUP_PREFIX: &str = "#";

#[derive(Debug, Clone)]
pub struct GroupSymbol {
    symbol: Symbol,
    schema: Option<String>,
    short_name: String,
    definition: Option<String>,
    output_definition: Option<String>,
    metadata_id: Option<MetadataId>,
    is_temp_table: bool,
    is_global_table: bool,
    is_procedure: bool,
}

impl GroupSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let (schema, short_name) = split_schema(&name);
        Self {
            symbol: Symbol::new(name),
            schema,
            short_name,
            definition: None,
            output_definition: None,
            metadata_id: None,
            is_temp_table: false,
            is_global_table: false,
            is_procedure: false,
        }
    }

    /// 带别名的分组：`definition AS alias`
    pub fn with_definition(alias: impl Into<String>, definition: impl Into<String>) -> Self {
        let mut group = Self::new(alias);
        group.definition = Some(definition.into());
        group
    }

    pub fn name(&self) -> &str {
        self.symbol.name()
    }

    /// 改名后重新拆分模式名和短名
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        let (schema, short_name) = split_schema(&name);
        self.schema = schema;
        self.short_name = short_name;
        self.symbol.set_name(name);
    }

    pub fn canonical_name(&self) -> &str {
        self.symbol.canonical_name()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn output_name(&self) -> &str {
        self.symbol.output_name()
    }

    pub fn set_output_name(&mut self, output_name: Option<String>) {
        self.symbol.set_output_name(output_name);
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn set_definition(&mut self, definition: Option<String>) {
        self.definition = definition;
    }

    pub fn output_definition(&self) -> Option<&str> {
        self.output_definition.as_deref().or(self.definition.as_deref())
    }

    pub fn set_output_definition(&mut self, output_definition: Option<String>) {
        self.output_definition = output_definition;
    }

    /// 非相关名称：有定义时为定义，否则为名称
    pub fn non_correlation_name(&self) -> &str {
        self.definition.as_deref().unwrap_or_else(|| self.name())
    }

    pub fn is_aliased(&self) -> bool {
        self.definition.is_some()
    }

    pub fn metadata_id(&self) -> Option<&MetadataId> {
        self.metadata_id.as_ref()
    }

    /// 绑定元数据
    ///
    /// 绑定后不能再清除。名称符合临时表约定时同时标记为临时表。
    pub fn set_metadata_id(&mut self, metadata_id: MetadataId) {
        log::trace!("分组 {} 绑定元数据 {}", self.name(), metadata_id);
        self.metadata_id = Some(metadata_id);
        if Self::is_temp_group_name(self.non_correlation_name()) {
            self.is_temp_table = true;
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.metadata_id.is_some()
    }

    pub fn is_temp_table(&self) -> bool {
        self.is_temp_table
    }

    pub fn set_temp_table(&mut self, is_temp_table: bool) {
        self.is_temp_table = is_temp_table;
    }

    pub fn is_global_table(&self) -> bool {
        self.is_global_table
    }

    pub fn set_global_table(&mut self, is_global_table: bool) {
        self.is_global_table = is_global_table;
    }

    pub fn is_procedure(&self) -> bool {
        self.is_procedure
    }

    pub fn set_procedure(&mut self, is_procedure: bool) {
        self.is_procedure = is_procedure;
    }

    /// 是否为临时分组
    ///
    /// 解析前只看命名约定，解析后看绑定时记录的标志。
    pub fn is_temp_group_symbol(&self) -> bool {
        self.is_temp_table
            || (self.metadata_id.is_none()
                && Self::is_temp_group_name(self.non_correlation_name()))
    }

    /// 由命名约定隐式创建的临时表
    pub fn is_implicit_temp_group_symbol(&self) -> bool {
        self.is_temp_table && Self::is_temp_group_name(self.non_correlation_name())
    }

    pub fn is_temp_group_name(name: &str) -> bool {
        name.starts_with(TEMP_GROUP_PREFIX)
    }

    pub fn hash_code(&self) -> u64 {
        self.symbol.hash_code()
    }
}

fn split_schema(name: &str) -> (Option<String>, String) {
    match name.find(SEPARATOR) {
        Some(index) => (
            Some(name[..index].to_string()),
            name[index + 1..].to_string(),
        ),
        None => (None, name.to_string()),
    }
}

impl PartialEq for GroupSymbol {
    fn eq(&self, other: &Self) -> bool {
        match (&self.schema, &other.schema) {
            (Some(schema), Some(other_schema)) => {
                schema.to_uppercase() == other_schema.to_uppercase()
                    && self.short_name.to_uppercase() == other.short_name.to_uppercase()
            }
            _ => self.symbol == other.symbol,
        }
    }
}

impl Eq for GroupSymbol {}

impl Hash for GroupSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.symbol.hash_code());
    }
}
