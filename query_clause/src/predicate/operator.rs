//! Comparison operators and array quantifiers

use crate::errors::QueryClauseError;
use std::fmt;
use std::str::FromStr;

/// How an operator consumes its operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// No operand (`IS NULL`)
    Unary,
    /// One bound operand
    Binary,
    /// Two bound operands (`BETWEEN`)
    Range,
    /// Inlined literal list (`IN`)
    List,
}

/// Query condition operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,                        // =
    Ne,                        // !=
    Gt,                        // >
    Gte,                       // >=
    Lt,                        // <
    Lte,                       // <=
    Like,                      // LIKE
    NotLike,                   // NOT LIKE
    ILike,                     // ILIKE
    NotILike,                  // NOT ILIKE
    Contains,                  // @>
    NotContains,               // NOT @>
    ContainedBy,               // <@
    NotContainedBy,            // NOT <@
    Overlap,                   // &&
    NotOverlap,                // NOT &&
    InetContainedBy,           // <<
    NotInetContainedBy,        // NOT <<
    InetContainedByOrEqual,    // <<=
    NotInetContainedByOrEqual, // NOT <<=
    InetContains,              // >>
    NotInetContains,           // NOT >>
    InetContainsOrEqual,       // >>=
    NotInetContainsOrEqual,    // NOT >>=
    In,                        // IN
    NotIn,                     // NOT IN
    IsNull,                    // IS NULL
    IsNotNull,                 // IS NOT NULL
    Between,                   // BETWEEN
}

impl Operator {
    const ALL: [Operator; 29] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Like,
        Operator::NotLike,
        Operator::ILike,
        Operator::NotILike,
        Operator::Contains,
        Operator::NotContains,
        Operator::ContainedBy,
        Operator::NotContainedBy,
        Operator::Overlap,
        Operator::NotOverlap,
        Operator::InetContainedBy,
        Operator::NotInetContainedBy,
        Operator::InetContainedByOrEqual,
        Operator::NotInetContainedByOrEqual,
        Operator::InetContains,
        Operator::NotInetContains,
        Operator::InetContainsOrEqual,
        Operator::NotInetContainsOrEqual,
        Operator::In,
        Operator::NotIn,
        Operator::IsNull,
        Operator::IsNotNull,
        Operator::Between,
    ];

    /// Every supported operator
    pub fn available() -> &'static [Operator] {
        &Self::ALL
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::ILike => "ILIKE",
            Operator::NotILike => "NOT ILIKE",
            Operator::Contains => "@>",
            Operator::NotContains => "NOT @>",
            Operator::ContainedBy => "<@",
            Operator::NotContainedBy => "NOT <@",
            Operator::Overlap => "&&",
            Operator::NotOverlap => "NOT &&",
            Operator::InetContainedBy => "<<",
            Operator::NotInetContainedBy => "NOT <<",
            Operator::InetContainedByOrEqual => "<<=",
            Operator::NotInetContainedByOrEqual => "NOT <<=",
            Operator::InetContains => ">>",
            Operator::NotInetContains => "NOT >>",
            Operator::InetContainsOrEqual => ">>=",
            Operator::NotInetContainsOrEqual => "NOT >>=",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::Between => "BETWEEN",
        }
    }

    pub fn kind(&self) -> OperatorKind {
        match self {
            Operator::IsNull | Operator::IsNotNull => OperatorKind::Unary,
            Operator::In | Operator::NotIn => OperatorKind::List,
            Operator::Between => OperatorKind::Range,
            _ => OperatorKind::Binary,
        }
    }

    /// Only binary operators can be combined with `ANY` / `ALL`
    pub fn supports_quantifier(&self) -> bool {
        self.kind() == OperatorKind::Binary
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

impl FromStr for Operator {
    type Err = QueryClauseError;

    /// Parse the SQL spelling, ignoring case and repeated whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();

        Self::ALL
            .iter()
            .copied()
            .find(|op| op.to_sql() == normalized)
            .ok_or_else(|| QueryClauseError::UnknownOperator(s.to_string()))
    }
}

/// Array comparison modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Any,
    All,
}

impl Quantifier {
    pub fn available() -> &'static [Quantifier] {
        &[Quantifier::Any, Quantifier::All]
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            Quantifier::Any => "ANY",
            Quantifier::All => "ALL",
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

impl FromStr for Quantifier {
    type Err = QueryClauseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ANY" => Ok(Quantifier::Any),
            "ALL" => Ok(Quantifier::All),
            _ => Err(QueryClauseError::UnknownQuantifier(s.to_string())),
        }
    }
}
