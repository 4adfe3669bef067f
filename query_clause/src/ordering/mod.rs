//! ORDER BY clause construction
//!
//! This module provides the ordering spec and sort direction types.

pub mod order_spec;
pub mod sort_order;

#[cfg(test)]
mod tests;

pub use order_spec::{OrderingSpec, SortCondition, SortEntry};
pub use sort_order::{NullsPlacement, SortOrder};
