//! WHERE clause construction
//!
//! This module provides the predicate tree and the operator set it accepts.

pub mod condition;
pub mod cursor;
pub mod operator;
pub mod tree;


pub use condition::{Comparison, SimpleCondition};
pub use cursor::{Cursor, RenderedWhere};
pub use operator::{Operator, OperatorKind, Quantifier};
pub use tree::{Combinator, PredicateTree};
