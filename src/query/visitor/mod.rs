//! 表达式访问器模块
//! 解析、校验和渲染都以访问者的形式实现

mod aggregate_collector;
mod element_collector;
mod resolved_state;
mod sql_string;

pub use aggregate_collector::AggregateSymbolCollectorVisitor;
pub use element_collector::ElementCollectorVisitor;
pub use resolved_state::ResolvedStateVisitor;
pub use sql_string::SqlStringVisitor;
