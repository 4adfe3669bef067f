//! Error types for the ClauseHaus crate
//!
//! This module contains all error types that can be returned by ClauseHaus operations.

use query_clause::QueryClauseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClauseHausError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Resource already registered: {0}")]
    ResourceAlreadyRegistered(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Clause error: {0}")]
    Clause(#[from] QueryClauseError),

    #[error("Resource '{resource}' is invalid: {source}")]
    InvalidResource {
        resource: String,
        source: QueryClauseError,
    },
}
