//! Placeholder cursor and render output

use crate::errors::QueryClauseError;
use crate::statement::PreparedStatement;
use crate::BindParams;
use serde::Serialize;

/// Position used to name placeholders during a tree traversal.
///
/// [`PredicateTree::get_where`](crate::PredicateTree::get_where) and
/// [`PredicateTree::get_bind_params`](crate::PredicateTree::get_bind_params)
/// advance it identically, so two cursors starting at the same position yield
/// matching placeholder names.
///
/// A placeholder name is the alias immediately followed by the position, with
/// no separator. Aliases ending in a digit can therefore produce the same name
/// as a shorter alias further along (`a1` at 1 and `a` at 11 both yield `a11`),
/// and the later bind value replaces the earlier one. Give such aliases a
/// non-digit suffix when both shapes are registered together.
///
/// Positions are counted in `u64`, so a traversal starting at `u32::MAX`
/// still advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor(u64);

impl Cursor {
    pub fn new(start: u32) -> Self {
        Self(u64::from(start))
    }

    pub fn position(&self) -> u64 {
        self.0
    }

    /// Placeholder base name for `alias` at the current position, then advance
    pub(crate) fn next_placeholder(&mut self, alias: &str) -> String {
        let placeholder = format!("{}{}", alias, self.0);
        self.advance();
        placeholder
    }

    pub(crate) fn advance(&mut self) {
        self.0 += 1;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self(1)
    }
}

/// WHERE fragment and its bind parameters produced by a single traversal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedWhere {
    pub sql: String,
    pub params: BindParams,
}

impl RenderedWhere {
    /// Rewrite into a positional statement ready for sqlx
    pub fn into_prepared(self) -> Result<PreparedStatement, QueryClauseError> {
        PreparedStatement::from_named(&self.sql, &self.params)
    }
}
