//! # ClauseHaus
//!
//! Composable WHERE and ORDER BY clause builders for parameterized PostgreSQL
//! statements, with named field aliases, nested AND/OR predicate trees and
//! reorderable sort specs.
//!
//! ## Quick Start
//!
//! ```rust
//! use clausehaus::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut filter = PredicateTree::with_fields(
//!     Combinator::And,
//!     vec![("age", "u.age"), ("status", "u.status")],
//! )?;
//! filter.add_simple_condition("age", 30, Operator::Gte, None)?;
//!
//! let mut either = PredicateTree::with_fields(Combinator::Or, vec![("status", "u.status")])?;
//! either.eq("status", "active")?;
//! either.eq("status", "trial")?;
//! filter.add_conditions(either)?;
//!
//! let mut order = OrderingSpec::new();
//! order.add_condition("name", Some("u.name"), SortOrder::Asc)?;
//! order.add_condition("created", Some("u.created_at"), SortOrder::Desc)?;
//! order.raise_conditions_in_order(["created"])?;
//!
//! let rendered = filter.render(1);
//! assert_eq!(
//!     rendered.sql,
//!     "u.age >= (:age1) AND (u.status = (:status2) OR u.status = (:status3))"
//! );
//!
//! let statement = PreparedStatement::select(
//!     "SELECT * FROM users u",
//!     &rendered,
//!     &order.get_order_by(),
//! )?;
//! assert_eq!(
//!     statement.sql(),
//!     "SELECT * FROM users u WHERE u.age >= ($1) AND (u.status = ($2) OR u.status = ($3)) \
//!      ORDER BY u.created_at DESC, u.name ASC NULLS LAST"
//! );
//! # Ok(())
//! # }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;
pub mod resource;

// Re-export the main public types for convenience
pub use crate::core::ClauseHaus;
pub use errors::ClauseHausError;
pub use resource::ResourceClauses;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, NullsOrder, RenderConfig, ResourceConfig, SortDirection};

// Re-export internal crates used by the public API
pub use query_clause;

// Re-export external dependencies used in public API
pub use sqlx;
