use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryClauseError {
    #[error("Field collision for '{alias}': registered as '{existing}', got '{requested}'")]
    Conflict {
        alias: String,
        existing: String,
        requested: String,
    },

    #[error("Field not registered: {0}")]
    UnknownField(String),

    #[error("Sort condition not registered: {0}")]
    UnknownCondition(String),

    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("Unknown array quantifier '{0}'")]
    UnknownQuantifier(String),

    #[error("Unknown sort direction '{0}'")]
    UnknownDirection(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Predicate tree {0} is already part of this tree")]
    DuplicateChild(Uuid),

    #[error("Placeholder ':{0}' has no bound value")]
    UnboundPlaceholder(String),
}

impl QueryClauseError {
    pub fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
