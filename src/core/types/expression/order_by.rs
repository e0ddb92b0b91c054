//! ORDER BY 子句

use serde::{Deserialize, Serialize};

use super::def::Expression;

/// NULL 值的排序位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullOrdering {
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderByItem {
    pub expression: Expression,
    pub ascending: bool,
    pub null_ordering: Option<NullOrdering>,
}

impl OrderByItem {
    pub fn new(expression: Expression, ascending: bool) -> Self {
        Self {
            expression,
            ascending,
            null_ordering: None,
        }
    }

    pub fn with_null_ordering(mut self, null_ordering: NullOrdering) -> Self {
        self.null_ordering = Some(null_ordering);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OrderBy {
    items: Vec<OrderByItem>,
}

impl OrderBy {
    pub fn new(items: Vec<OrderByItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[OrderByItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<OrderByItem> {
        &mut self.items
    }

    pub fn add_item(&mut self, expression: Expression, ascending: bool) {
        self.items.push(OrderByItem::new(expression, ascending));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
