//! ResolvedStateVisitor - 检查树中是否还有未解析的节点
//!
//! 解析器完成后用它确认每个符号都绑定了元数据，每个函数都有类型。

use crate::core::types::expression::{
    AggregateSymbol, ElementSymbol, Function, GroupSymbol, LanguageObjectRef, LanguageVisitor,
    MultipleElementSymbol, PreOrderNavigator, Reference, Typed,
};

#[derive(Debug, Default)]
pub struct ResolvedStateVisitor {
    unresolved: Vec<String>,
    /// 为 false 时遇到第一个未解析节点即停止
    collect_all: bool,
}

impl ResolvedStateVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collecting_all() -> Self {
        Self {
            unresolved: Vec::new(),
            collect_all: true,
        }
    }

    /// 未解析节点的描述
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// 整棵树（包括子查询）是否都已解析
    pub fn is_resolved<'a>(object: impl Into<LanguageObjectRef<'a>>) -> bool {
        let mut visitor = ResolvedStateVisitor::new();
        PreOrderNavigator::do_visit_deep(object, &mut visitor);
        visitor.unresolved.is_empty()
    }

    /// 列出所有未解析节点
    pub fn find_unresolved<'a>(object: impl Into<LanguageObjectRef<'a>>) -> Vec<String> {
        let mut visitor = ResolvedStateVisitor::collecting_all();
        PreOrderNavigator::do_visit_deep(object, &mut visitor);
        visitor.unresolved
    }

    fn record(&mut self, kind: &str, name: &str) {
        log::trace!("未解析的{}: {}", kind, name);
        self.unresolved.push(format!("{} {}", kind, name));
    }
}

impl LanguageVisitor for ResolvedStateVisitor {
    fn visit_element_symbol(&mut self, obj: &ElementSymbol) {
        if !Typed::is_resolved(obj) {
            self.record("element", &obj.name());
        }
    }

    fn visit_group_symbol(&mut self, obj: &GroupSymbol) {
        if !obj.is_resolved() {
            self.record("group", obj.name());
        }
    }

    fn visit_reference(&mut self, obj: &Reference) {
        if !Typed::is_resolved(obj) {
            let index = obj.index().map_or_else(|| "?".to_string(), |i| i.to_string());
            self.record("reference", &index);
        }
    }

    fn visit_function(&mut self, obj: &Function) {
        // 参数由导航器单独检查
        if obj.data_type().is_none() || obj.descriptor().is_none() {
            self.record("function", obj.name());
        }
    }

    fn visit_aggregate_symbol(&mut self, obj: &AggregateSymbol) {
        if obj.data_type().is_none() {
            self.record("aggregate", obj.name());
        }
    }

    fn visit_multiple_element_symbol(&mut self, obj: &MultipleElementSymbol) {
        if !obj.is_resolved() {
            self.record("multiple element", &obj.name());
        }
    }

    fn should_continue(&self) -> bool {
        self.collect_all || self.unresolved.is_empty()
    }
}
