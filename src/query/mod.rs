// Query module
//
// External passes over the expression model. Every pass is a `LanguageVisitor`
// driven by the pre-order or post-order navigator.

pub mod visitor;

pub use visitor::{
    AggregateSymbolCollectorVisitor, ElementCollectorVisitor, ResolvedStateVisitor,
    SqlStringVisitor,
};
