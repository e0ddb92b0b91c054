//! 窗口函数
//!
//! `WindowFunction` 包装一个聚合和一个窗口定义；挂接的聚合总是被标记为窗口化。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::aggregate::AggregateSymbol;
use super::def::Expression;
use super::order_by::OrderBy;
use crate::core::types::DataType;

/// 窗口帧模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameMode {
    Rows,
    Range,
}

impl fmt::Display for FrameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameMode::Rows => f.write_str("ROWS"),
            FrameMode::Range => f.write_str("RANGE"),
        }
    }
}

/// 窗口帧边界
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(u64),
    CurrentRow,
    Following(u64),
    UnboundedFollowing,
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameBound::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            FrameBound::Preceding(n) => write!(f, "{} PRECEDING", n),
            FrameBound::CurrentRow => f.write_str("CURRENT ROW"),
            FrameBound::Following(n) => write!(f, "{} FOLLOWING", n),
            FrameBound::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowFrame {
    pub mode: FrameMode,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
}

impl WindowFrame {
    pub fn new(mode: FrameMode, start: FrameBound) -> Self {
        Self {
            mode,
            start,
            end: None,
        }
    }

    pub fn between(mode: FrameMode, start: FrameBound, end: FrameBound) -> Self {
        Self {
            mode,
            start,
            end: Some(end),
        }
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => write!(f, "{} BETWEEN {} AND {}", self.mode, self.start, end),
            None => write!(f, "{} {}", self.mode, self.start),
        }
    }
}

/// 窗口定义：PARTITION BY、ORDER BY 和帧
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct WindowSpecification {
    pub partition: Vec<Expression>,
    pub order_by: Option<OrderBy>,
    pub frame: Option<WindowFrame>,
}

impl WindowSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_partition(mut self, partition: Vec<Expression>) -> Self {
        self.partition = partition;
        self
    }

    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn with_frame(mut self, frame: WindowFrame) -> Self {
        self.frame = Some(frame);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowFunction {
    function: AggregateSymbol,
    window_specification: WindowSpecification,
}

impl WindowFunction {
    pub fn new(mut function: AggregateSymbol, window_specification: WindowSpecification) -> Self {
        function.set_windowed(true);
        Self {
            function,
            window_specification,
        }
    }

    pub fn function(&self) -> &AggregateSymbol {
        &self.function
    }

    pub fn function_mut(&mut self) -> &mut AggregateSymbol {
        &mut self.function
    }

    pub fn set_function(&mut self, mut function: AggregateSymbol) {
        function.set_windowed(true);
        self.function = function;
    }

    pub fn window_specification(&self) -> &WindowSpecification {
        &self.window_specification
    }

    pub fn window_specification_mut(&mut self) -> &mut WindowSpecification {
        &mut self.window_specification
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.function.data_type()
    }

    pub(crate) fn children_mut(&mut self) -> Vec<&mut Expression> {
        let mut children = self.function.children_mut();
        children.extend(self.window_specification.partition.iter_mut());
        if let Some(order_by) = self.window_specification.order_by.as_mut() {
            children.extend(order_by.items_mut().iter_mut().map(|item| &mut item.expression));
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::expression::{ElementSymbol, OrderByItem};

    #[test]
    fn test_attached_aggregate_is_windowed() {
        let rank = AggregateSymbol::new("ROW_NUMBER", false, None).expect("聚合名合法");
        assert!(!rank.is_windowed());

        let spec = WindowSpecification::new().with_order_by(OrderBy::new(vec![OrderByItem::new(
            Expression::ElementSymbol(ElementSymbol::new("e1")),
            true,
        )]));
        let window = WindowFunction::new(rank, spec);
        assert!(window.function().is_windowed());
        assert_eq!(window.data_type(), Some(DataType::Integer));

        let mut replaced = window.clone();
        replaced.set_function(AggregateSymbol::count_star());
        assert!(replaced.function().is_windowed());
    }

    #[test]
    fn test_frame_display() {
        let frame = WindowFrame::between(
            FrameMode::Rows,
            FrameBound::Preceding(2),
            FrameBound::CurrentRow,
        );
        assert_eq!(frame.to_string(), "ROWS BETWEEN 2 PRECEDING AND CURRENT ROW");
        assert_eq!(
            WindowFrame::new(FrameMode::Range, FrameBound::UnboundedPreceding).to_string(),
            "RANGE UNBOUNDED PRECEDING"
        );
    }
}
