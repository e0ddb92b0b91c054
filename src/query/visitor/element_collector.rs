//! ElementCollectorVisitor - 收集表达式树中引用的列和分组

use crate::core::types::expression::{
    ElementSymbol, GroupSymbol, LanguageObjectRef, LanguageVisitor, MultipleElementSymbol,
    PreOrderNavigator,
};

#[derive(Debug, Default)]
pub struct ElementCollectorVisitor {
    elements: Vec<ElementSymbol>,
    /// 是否收集 `*` 展开后的元素
    expand_multiple: bool,
}

impl ElementCollectorVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expand_multiple(mut self, expand_multiple: bool) -> Self {
        self.expand_multiple = expand_multiple;
        self
    }

    pub fn elements(&self) -> &[ElementSymbol] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<ElementSymbol> {
        self.elements
    }

    /// 收集节点下的所有列引用，按出现顺序，可能重复
    ///
    /// `deep` 为 true 时也进入子查询。
    pub fn get_elements<'a>(
        object: impl Into<LanguageObjectRef<'a>>,
        deep: bool,
    ) -> Vec<ElementSymbol> {
        let mut visitor = ElementCollectorVisitor::new();
        if deep {
            PreOrderNavigator::do_visit_deep(object, &mut visitor);
        } else {
            PreOrderNavigator::do_visit(object, &mut visitor);
        }
        visitor.elements
    }

    /// 列引用所属的分组，去重后按首次出现顺序
    pub fn get_groups<'a>(
        object: impl Into<LanguageObjectRef<'a>>,
        deep: bool,
    ) -> Vec<GroupSymbol> {
        let mut groups: Vec<GroupSymbol> = Vec::new();
        for element in Self::get_elements(object, deep) {
            if let Some(group) = element.group_symbol() {
                if !groups.contains(group) {
                    groups.push(group.clone());
                }
            }
        }
        groups
    }
}

impl LanguageVisitor for ElementCollectorVisitor {
    fn visit_element_symbol(&mut self, obj: &ElementSymbol) {
        self.elements.push(obj.clone());
    }

    fn visit_multiple_element_symbol(&mut self, obj: &MultipleElementSymbol) {
        if self.expand_multiple {
            if let Some(elements) = obj.elements() {
                self.elements.extend(elements.iter().cloned());
            }
        }
    }
}
