//! 符号标识基础
//!
//! 名称、规范名、输出名三元组。规范名与哈希值在构造和改名时立即计算，
//! 之后的相等比较只看规范名（大小写不敏感），哈希即规范名的哈希。
//!
//! 放进哈希集合后不能再改名：集合中的键只能以共享引用取得，
//! `set_name` 需要可变引用，借用检查器因此会拒绝这种用法。

use std::hash::{Hash, Hasher};

use crate::core::murmur::murmurhash2_str;
use crate::core::types::{TypeRegistry, RUNTIME_TYPES};

/// 名称分隔符
pub const SEPARATOR: char = '.';

#[derive(Debug, Clone)]
pub struct Symbol {
    name: String,
    canonical_name: String,
    output_name: Option<String>,
    hash: u64,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let canonical_name = RUNTIME_TYPES.canonicalize_string(&name);
        let hash = murmurhash2_str(&canonical_name, 0) as u64;
        Self {
            name,
            canonical_name,
            output_name: None,
            hash,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 改名，同时重新计算规范名和哈希
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.canonical_name = RUNTIME_TYPES.canonicalize_string(&name);
        self.hash = murmurhash2_str(&self.canonical_name, 0) as u64;
        self.name = name;
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// 输出名，未设置时等于名称
    pub fn output_name(&self) -> &str {
        self.output_name.as_deref().unwrap_or(&self.name)
    }

    /// 显式设置的输出名
    pub fn explicit_output_name(&self) -> Option<&str> {
        self.output_name.as_deref()
    }

    pub fn set_output_name(&mut self, output_name: Option<String>) {
        self.output_name = output_name;
    }

    pub fn hash_code(&self) -> u64 {
        self.hash
    }

    /// 名称最后一个分隔符之后的部分
    pub fn short_name(name: &str) -> &str {
        match name.rfind(SEPARATOR) {
            Some(index) => &name[index + 1..],
            None => name,
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.canonical_name == other.canonical_name
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_case_insensitive_equality() {
        let a = Symbol::new("pm1.g1");
        let b = Symbol::new("PM1.G1");
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_eq!(a.canonical_name(), "PM1.G1");
    }

    #[test]
    fn test_set_name_recomputes_identity() {
        let mut symbol = Symbol::new("a");
        let before = symbol.hash_code();
        symbol.set_name("b");
        assert_ne!(symbol.hash_code(), before);
        assert_eq!(symbol.canonical_name(), "B");
        assert_eq!(symbol, Symbol::new("B"));
    }

    #[test]
    fn test_output_name_defaults_to_name() {
        let mut symbol = Symbol::new("e1");
        assert_eq!(symbol.output_name(), "e1");
        symbol.set_output_name(Some("x".to_string()));
        assert_eq!(symbol.output_name(), "x");
        assert_eq!(symbol.name(), "e1");
    }

    #[test]
    fn test_clone_keeps_identity() {
        let mut symbol = Symbol::new("e1");
        symbol.set_output_name(Some("out".to_string()));
        let copy = symbol.clone();
        assert_eq!(copy.canonical_name(), symbol.canonical_name());
        assert_eq!(copy.output_name(), "out");
        assert_eq!(copy.hash_code(), symbol.hash_code());
    }

    #[test]
    fn test_symbols_in_hash_set() {
        let set: HashSet<Symbol> = ["a", "A", "b"].iter().map(|n| Symbol::new(*n)).collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(Symbol::short_name("pm1.g1.e1"), "e1");
        assert_eq!(Symbol::short_name("e1"), "e1");
    }
}
