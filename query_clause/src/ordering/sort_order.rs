//! Sort direction and NULL placement

use crate::errors::QueryClauseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn available() -> &'static [SortOrder] {
        &[SortOrder::Asc, SortOrder::Desc]
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

impl FromStr for SortOrder {
    type Err = QueryClauseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(QueryClauseError::UnknownDirection(s.to_string())),
        }
    }
}

/// Where NULLs go in the rendered ORDER BY
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NullsPlacement {
    First,
    #[default]
    Last,
}

impl NullsPlacement {
    pub fn to_sql(&self) -> &'static str {
        match self {
            NullsPlacement::First => "NULLS FIRST",
            NullsPlacement::Last => "NULLS LAST",
        }
    }
}
