//! Convenience re-exports for common ClauseHaus usage
//!
//! This prelude module re-exports the most commonly used items from the ClauseHaus crates,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use clausehaus::prelude::*;
//!
//! let mut order = OrderingSpec::new();
//! order.add_condition("name", None, SortOrder::Asc).unwrap();
//! assert_eq!(order.get_order_by(), "ORDER BY name ASC NULLS LAST");
//! ```

// Core ClauseHaus components
pub use crate::core::ClauseHaus;
pub use crate::errors::ClauseHausError;
pub use crate::resource::ResourceClauses;

// Re-export centralized config
pub use config::{AppConfig, NullsOrder, RenderConfig, ResourceConfig, SortDirection};

// Re-export commonly used query-clause types for convenience
pub use query_clause::prelude::*;

// Common external dependencies
pub use sqlx;

// Commonly used sqlx types
pub use sqlx::{FromRow, PgPool, Postgres};
