//! XML 构造与查询表达式
//!
//! 所有节点都拥有自己的子列表，克隆即深拷贝。

use serde::{Deserialize, Serialize};

use super::derived_column::DerivedColumn;
use super::def::Expression;
use crate::core::types::DataType;

/// 命名空间声明
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamespaceItem {
    /// `DEFAULT 'uri'`
    Default(String),
    /// `'uri' AS prefix`
    Prefixed { prefix: String, uri: String },
    /// `NO DEFAULT`
    NoDefault,
}

/// XMLNAMESPACES(...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct XmlNamespaces {
    pub items: Vec<NamespaceItem>,
}

impl XmlNamespaces {
    pub fn new(items: Vec<NamespaceItem>) -> Self {
        Self { items }
    }
}

/// XMLATTRIBUTES(...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct XmlAttributes {
    pub args: Vec<DerivedColumn>,
}

impl XmlAttributes {
    pub fn new(args: Vec<DerivedColumn>) -> Self {
        Self { args }
    }
}

/// XMLELEMENT(NAME n, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlElement {
    pub name: String,
    pub namespaces: Option<XmlNamespaces>,
    pub attributes: Option<XmlAttributes>,
    pub content: Vec<Expression>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>, content: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            namespaces: None,
            attributes: None,
            content,
        }
    }

    pub fn with_namespaces(mut self, namespaces: XmlNamespaces) -> Self {
        self.namespaces = Some(namespaces);
        self
    }

    pub fn with_attributes(mut self, attributes: XmlAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// XMLFOREST(...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlForest {
    pub namespaces: Option<XmlNamespaces>,
    pub args: Vec<DerivedColumn>,
}

impl XmlForest {
    pub fn new(args: Vec<DerivedColumn>) -> Self {
        Self {
            namespaces: None,
            args,
        }
    }
}

/// XMLQUERY('xquery' PASSING ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlQuery {
    pub xquery: String,
    pub namespaces: Option<XmlNamespaces>,
    pub passing: Vec<DerivedColumn>,
    /// `Some(true)` 为 EMPTY ON EMPTY，`Some(false)` 为 NULL ON EMPTY
    pub empty_on_empty: Option<bool>,
}

impl XmlQuery {
    pub fn new(xquery: impl Into<String>, passing: Vec<DerivedColumn>) -> Self {
        Self {
            xquery: xquery.into(),
            namespaces: None,
            passing,
            empty_on_empty: None,
        }
    }
}

/// XMLCAST(expr AS type)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlCast {
    pub expression: Box<Expression>,
    pub data_type: DataType,
}

impl XmlCast {
    pub fn new(expression: Expression, data_type: DataType) -> Self {
        Self {
            expression: Box::new(expression),
            data_type,
        }
    }
}

/// XMLPARSE(DOCUMENT|CONTENT expr [WELLFORMED])
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlParse {
    pub document: bool,
    pub expression: Box<Expression>,
    pub well_formed: bool,
}

impl XmlParse {
    pub fn new(document: bool, expression: Expression, well_formed: bool) -> Self {
        Self {
            document,
            expression: Box::new(expression),
            well_formed,
        }
    }
}

/// XMLSERIALIZE([DOCUMENT|CONTENT] expr [AS type] ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlSerialize {
    pub document: Option<bool>,
    pub expression: Box<Expression>,
    pub data_type: DataType,
    pub declaration: Option<bool>,
    pub version: Option<String>,
    pub encoding: Option<String>,
}

impl XmlSerialize {
    /// 目标类型默认为字符串
    pub fn new(expression: Expression) -> Self {
        Self {
            document: None,
            expression: Box::new(expression),
            data_type: DataType::String,
            declaration: None,
            version: None,
            encoding: None,
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }
}

/// XMLEXISTS(...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlExists {
    pub xml_query: XmlQuery,
}

impl XmlExists {
    pub fn new(xml_query: XmlQuery) -> Self {
        Self { xml_query }
    }
}
