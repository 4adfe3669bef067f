//! Query Clause - WHERE and ORDER BY construction for Clausehaus
//!
//! This crate provides the building blocks used to assemble the dynamic parts
//! of parameterized SQL statements: field registries, recursive predicate trees
//! with named placeholders, ordering specs and a prepared statement helper for sqlx.

// Feature-gated logging, compiled out unless `debug-logging` is enabled
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod errors;
pub mod field_registry;
pub mod ordering;
pub mod predicate;
pub mod prelude;
pub mod quoting;
pub mod statement;

pub use errors::QueryClauseError;
pub use field_registry::{FieldEntry, FieldRegistry};
pub use ordering::{NullsPlacement, OrderingSpec, SortCondition, SortEntry, SortOrder};
pub use predicate::{
    Combinator, Comparison, Cursor, Operator, OperatorKind, PredicateTree, Quantifier,
    RenderedWhere, SimpleCondition,
};
pub use quoting::{PgQuoter, ValueQuoter};
pub use statement::PreparedStatement;

/// Ordered mapping of placeholder names (without the leading `:`) to bind values
pub type BindParams = indexmap::IndexMap<String, serde_json::Value>;
