//! 元素符号
//!
//! 列引用。绑定分组后名称为 `分组名.短名`，符号本身只保存短名。

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::group_symbol::GroupSymbol;
use super::symbol::{Symbol, SEPARATOR};
use crate::core::murmur::murmurhash2_str;
use crate::core::error::{ExpressionError, ExpressionResult};
use crate::core::types::metadata::MetadataId;
use crate::core::types::DataType;

/// 渲染时使用的名称形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// 完整限定名
    FullyQualified,
    /// 输出名
    #[default]
    OutputName,
    /// 输出名去掉限定部分
    ShortOutputName,
}

#[derive(Debug, Clone)]
pub struct ElementSymbol {
    symbol: Symbol,
    group_symbol: Option<GroupSymbol>,
    metadata_id: Option<MetadataId>,
    data_type: Option<DataType>,
    is_external_reference: bool,
    is_aggregate: bool,
    display_mode: DisplayMode,
}

impl ElementSymbol {
    /// 由名称构造，限定名会拆出分组
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let (group_symbol, short_name) = match name.rfind(SEPARATOR) {
            Some(index) if index > 0 => (
                Some(GroupSymbol::new(&name[..index])),
                name[index + 1..].to_string(),
            ),
            _ => (None, name),
        };
        Self {
            symbol: Symbol::new(short_name),
            group_symbol,
            metadata_id: None,
            data_type: None,
            is_external_reference: false,
            is_aggregate: false,
            display_mode: DisplayMode::default(),
        }
    }

    /// 由短名和分组构造，短名原样保留，不做拆分
    pub fn with_group(short_name: impl Into<String>, group_symbol: GroupSymbol) -> Self {
        Self {
            symbol: Symbol::new(short_name),
            group_symbol: Some(group_symbol),
            metadata_id: None,
            data_type: None,
            is_external_reference: false,
            is_aggregate: false,
            display_mode: DisplayMode::default(),
        }
    }

    /// 完整名称
    pub fn name(&self) -> String {
        match &self.group_symbol {
            Some(group) => format!("{}{}{}", group.name(), SEPARATOR, self.symbol.name()),
            None => self.symbol.name().to_string(),
        }
    }

    /// 改名
    ///
    /// 限定名会拆出分组；已绑定分组时不允许用限定名改名，需要改用 `set_group_symbol`。
    /// 非限定名清除分组。
    pub fn set_name(&mut self, name: impl Into<String>) -> ExpressionResult<()> {
        let name = name.into();
        match name.rfind(SEPARATOR) {
            Some(index) if index > 0 => {
                if self.group_symbol.is_some() {
                    return Err(ExpressionError::invalid_operation(format!(
                        "元素已绑定分组，不能改名为限定名: {}",
                        name
                    )));
                }
                self.group_symbol = Some(GroupSymbol::new(&name[..index]));
                self.symbol.set_name(&name[index + 1..]);
            }
            _ => {
                self.group_symbol = None;
                self.symbol.set_name(name);
            }
        }
        Ok(())
    }

    pub fn canonical_name(&self) -> String {
        match &self.group_symbol {
            Some(group) => format!(
                "{}{}{}",
                group.canonical_name(),
                SEPARATOR,
                self.symbol.canonical_name()
            ),
            None => self.symbol.canonical_name().to_string(),
        }
    }

    pub fn short_name(&self) -> &str {
        self.symbol.name()
    }

    /// 修改短名，短名不能包含分隔符
    pub fn set_short_name(&mut self, short_name: impl Into<String>) -> ExpressionResult<()> {
        let short_name = short_name.into();
        if short_name.contains(SEPARATOR) {
            return Err(ExpressionError::invalid_argument(format!(
                "短名不能包含分隔符: {}",
                short_name
            )));
        }
        self.symbol.set_name(short_name);
        Ok(())
    }

    pub fn short_canonical_name(&self) -> &str {
        self.symbol.canonical_name()
    }

    /// 输出名，未设置时为完整名称
    pub fn output_name(&self) -> String {
        match self.symbol.explicit_output_name() {
            Some(output_name) => output_name.to_string(),
            None => self.name(),
        }
    }

    pub fn set_output_name(&mut self, output_name: Option<String>) {
        self.symbol.set_output_name(output_name);
    }

    pub fn group_symbol(&self) -> Option<&GroupSymbol> {
        self.group_symbol.as_ref()
    }

    pub fn group_symbol_mut(&mut self) -> Option<&mut GroupSymbol> {
        self.group_symbol.as_mut()
    }

    pub fn set_group_symbol(&mut self, group_symbol: Option<GroupSymbol>) {
        self.group_symbol = group_symbol;
    }

    pub fn metadata_id(&self) -> Option<&MetadataId> {
        self.metadata_id.as_ref()
    }

    pub fn set_metadata_id(&mut self, metadata_id: MetadataId) {
        log::trace!("元素 {} 绑定元数据 {}", self.name(), metadata_id);
        self.metadata_id = Some(metadata_id);
    }

    pub fn data_type(&self) -> Option<&DataType> {
        self.data_type.as_ref()
    }

    pub fn set_type(&mut self, data_type: DataType) {
        self.data_type = Some(data_type);
    }

    pub fn is_external_reference(&self) -> bool {
        self.is_external_reference
    }

    pub fn set_external_reference(&mut self, is_external_reference: bool) {
        self.is_external_reference = is_external_reference;
    }

    pub fn is_aggregate(&self) -> bool {
        self.is_aggregate
    }

    pub fn set_aggregate(&mut self, is_aggregate: bool) {
        self.is_aggregate = is_aggregate;
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn set_display_mode(&mut self, display_mode: DisplayMode) {
        self.display_mode = display_mode;
    }

    /// 元数据和类型都已绑定
    pub fn is_resolved(&self) -> bool {
        self.metadata_id.is_some() && self.data_type.is_some()
    }

    /// 完整规范名的哈希，与两种相等比较分支都一致
    pub fn hash_code(&self) -> u64 {
        match &self.group_symbol {
            Some(_) => murmurhash2_str(&self.canonical_name(), 0) as u64,
            None => self.symbol.hash_code(),
        }
    }
}

impl PartialEq for ElementSymbol {
    fn eq(&self, other: &Self) -> bool {
        match (&self.group_symbol, &other.group_symbol) {
            (Some(group), Some(other_group)) => {
                group == other_group && self.symbol == other.symbol
            }
            _ => self.canonical_name() == other.canonical_name(),
        }
    }
}

impl Eq for ElementSymbol {}

impl Hash for ElementSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_binding_composes_name() {
        let mut element = ElementSymbol::new("col");
        element.set_group_symbol(Some(GroupSymbol::new("t")));
        assert_eq!(element.name(), "t.col");
        assert_eq!(element.canonical_name(), "T.COL");
        assert_eq!(element.short_name(), "col");
    }

    #[test]
    fn test_qualified_name_splits_group() {
        let element = ElementSymbol::new("pm1.g1.e1");
        assert_eq!(element.short_name(), "e1");
        assert_eq!(element.group_symbol().map(|g| g.name()), Some("pm1.g1"));
        assert_eq!(element.name(), "pm1.g1.e1");
    }

    #[test]
    fn test_qualified_rename_rejected_when_bound() {
        let mut element = ElementSymbol::with_group("e1", GroupSymbol::new("g1"));
        let err = element.set_name("g2.e2").expect_err("应拒绝");
        assert_eq!(
            err.error_type,
            crate::core::error::ExpressionErrorType::InvalidOperation
        );
        assert_eq!(element.name(), "g1.e1");

        element.set_name("e2").expect("非限定名应允许");
        assert!(element.group_symbol().is_none());
        assert_eq!(element.name(), "e2");
    }

    #[test]
    fn test_equality_with_groups() {
        let a = ElementSymbol::with_group("e1", GroupSymbol::new("pm1.g1"));
        let b = ElementSymbol::with_group("E1", GroupSymbol::new("PM1.G1"));
        let c = ElementSymbol::with_group("e1", GroupSymbol::new("pm1.g2"));
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_ne!(a, c);
        assert_ne!(a, ElementSymbol::new("e1"));
        assert_eq!(ElementSymbol::new("e1"), ElementSymbol::new("E1"));
    }

    #[test]
    fn test_grouped_and_ungrouped_hash_agree() {
        use crate::core::murmur::hash_code;
        use std::collections::HashSet;

        let grouped = ElementSymbol::with_group("e1", GroupSymbol::new("pm1.g1"));
        let mut ungrouped = ElementSymbol::new("x");
        ungrouped.symbol.set_name("pm1.g1.e1");

        assert_eq!(grouped, ungrouped);
        assert_eq!(grouped.hash_code(), ungrouped.hash_code());
        assert_eq!(hash_code(&grouped), hash_code(&ungrouped));

        let set: HashSet<ElementSymbol> = [grouped].into_iter().collect();
        assert!(set.contains(&ungrouped));
    }

    #[test]
    fn test_set_short_name_rejects_separator() {
        let mut element = ElementSymbol::new("e1");
        let err = element.set_short_name("pm1.g1.e1").expect_err("应拒绝");
        assert_eq!(
            err.error_type,
            crate::core::error::ExpressionErrorType::InvalidArgument
        );
        assert_eq!(element.name(), "e1");

        element.set_short_name("e2").expect("短名合法");
        assert_eq!(element.name(), "e2");
    }

    #[test]
    fn test_with_group_keeps_dotted_short_name() {
        let element = ElementSymbol::with_group("x.e1", GroupSymbol::new("g"));
        assert_eq!(element.short_name(), "x.e1");
        assert_eq!(element.name(), "g.x.e1");
        assert_eq!(element.group_symbol().map(|g| g.name()), Some("g"));
    }

    #[test]
    fn test_resolution_requires_metadata_and_type() {
        let mut element = ElementSymbol::new("e1");
        assert!(!element.is_resolved());
        element.set_type(DataType::Integer);
        assert!(!element.is_resolved());
        element.set_metadata_id(MetadataId::catalog("pm1.g1.e1"));
        assert!(element.is_resolved());
    }

    #[test]
    fn test_clone_deep_copies_group() {
        let mut element = ElementSymbol::with_group("e1", GroupSymbol::new("g1"));
        element.set_type(DataType::String);
        element.set_external_reference(true);
        element.set_aggregate(true);
        element.set_display_mode(DisplayMode::FullyQualified);

        let mut copy = element.clone();
        if let Some(group) = copy.group_symbol_mut() {
            group.set_name("g2");
        }
        assert_eq!(element.name(), "g1.e1");
        assert_eq!(copy.name(), "g2.e1");
        assert_eq!(copy.data_type(), Some(&DataType::String));
        assert!(copy.is_external_reference());
        assert!(copy.is_aggregate());
        assert_eq!(copy.display_mode(), DisplayMode::FullyQualified);
    }

    #[test]
    fn test_output_name() {
        let mut element = ElementSymbol::new("g1.e1");
        assert_eq!(element.output_name(), "g1.e1");
        element.set_output_name(Some("x".to_string()));
        assert_eq!(element.output_name(), "x");
    }
}
