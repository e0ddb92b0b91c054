//! AggregateSymbolCollectorVisitor - 收集聚合与窗口函数
//!
//! 窗口函数内部的聚合属于窗口函数本身，不会再单独作为聚合收集。

use crate::core::types::expression::{
    AggregateSymbol, LanguageObjectRef, LanguageVisitor, PreOrderNavigator, WindowFunction,
};

#[derive(Debug, Default)]
pub struct AggregateSymbolCollectorVisitor {
    aggregates: Vec<AggregateSymbol>,
    window_functions: Vec<WindowFunction>,
}

impl AggregateSymbolCollectorVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aggregates(&self) -> &[AggregateSymbol] {
        &self.aggregates
    }

    pub fn window_functions(&self) -> &[WindowFunction] {
        &self.window_functions
    }

    /// 收集非窗口聚合，不进入子查询
    pub fn get_aggregates<'a>(object: impl Into<LanguageObjectRef<'a>>) -> Vec<AggregateSymbol> {
        let mut visitor = AggregateSymbolCollectorVisitor::new();
        PreOrderNavigator::do_visit(object, &mut visitor);
        visitor.aggregates
    }

    pub fn get_window_functions<'a>(
        object: impl Into<LanguageObjectRef<'a>>,
    ) -> Vec<WindowFunction> {
        let mut visitor = AggregateSymbolCollectorVisitor::new();
        PreOrderNavigator::do_visit(object, &mut visitor);
        visitor.window_functions
    }
}

impl LanguageVisitor for AggregateSymbolCollectorVisitor {
    fn visit_aggregate_symbol(&mut self, obj: &AggregateSymbol) {
        if !obj.is_windowed() {
            self.aggregates.push(obj.clone());
        }
    }

    fn visit_window_function(&mut self, obj: &WindowFunction) {
        self.window_functions.push(obj.clone());
    }
}
