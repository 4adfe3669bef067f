//! Convenience re-exports for common query-clause usage

// Errors
pub use crate::errors::QueryClauseError;

// Field registry
pub use crate::field_registry::{FieldEntry, FieldRegistry};

// WHERE building
pub use crate::predicate::{
    Combinator, Cursor, Operator, PredicateTree, Quantifier, RenderedWhere,
};

// ORDER BY building
pub use crate::ordering::{NullsPlacement, OrderingSpec, SortEntry, SortOrder};

// Quoting and statements
pub use crate::quoting::{PgQuoter, ValueQuoter};
pub use crate::statement::PreparedStatement;
pub use crate::BindParams;

// Common external dependencies that are frequently used
pub use serde_json::{json, Value};
