//! 元数据标识
//!
//! 解析器绑定到分组/元素符号上的不透明元数据句柄。本层只关心两件事：
//! 句柄是否已绑定，以及它是否指向临时作用域（用于判断引用是否相关）。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 元数据种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataKind {
    /// 目录中的持久对象
    Catalog,
    /// 临时作用域（临时表、过程变量组等）
    Temp {
        /// 是否为标量变量组
        scalar_group: bool,
    },
}

/// 元数据标识
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataId {
    name: Arc<str>,
    kind: MetadataKind,
}

impl MetadataId {
    pub fn new(name: impl Into<Arc<str>>, kind: MetadataKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// 目录对象的元数据标识
    pub fn catalog(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, MetadataKind::Catalog)
    }

    /// 临时作用域的元数据标识
    pub fn temp(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, MetadataKind::Temp { scalar_group: false })
    }

    /// 标量变量组的元数据标识
    pub fn scalar_group(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, MetadataKind::Temp { scalar_group: true })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MetadataKind {
        self.kind
    }

    pub fn is_temp(&self) -> bool {
        matches!(self.kind, MetadataKind::Temp { .. })
    }

    pub fn is_scalar_group(&self) -> bool {
        matches!(self.kind, MetadataKind::Temp { scalar_group: true })
    }
}

impl fmt::Display for MetadataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
