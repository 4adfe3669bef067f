//! Predicate tree
//!
//! Recursive WHERE builder. A node holds simple conditions grouped by field,
//! trusted raw fragments and nested child trees, joined by its combinator.

use crate::errors::QueryClauseError;
use crate::field_registry::{FieldEntry, FieldRegistry};
use crate::predicate::condition::{Comparison, SimpleCondition};
use crate::predicate::cursor::{Cursor, RenderedWhere};
use crate::predicate::operator::{Operator, Quantifier};
use crate::quoting::{PgQuoter, ValueQuoter};
use crate::BindParams;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Boolean join used by a node for its own direct contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Combinator::And => " AND ",
            Combinator::Or => " OR ",
        }
    }

    /// Identity element, rendered by a node without conditions
    pub fn identity(&self) -> &'static str {
        match self {
            Combinator::And => "true",
            Combinator::Or => "false",
        }
    }
}

/// Composable WHERE builder.
///
/// Cloning keeps the tree id, so a clone counts as the same sub-tree when
/// attached with [`PredicateTree::add_conditions`].
#[derive(Clone)]
pub struct PredicateTree {
    id: Uuid,
    combinator: Combinator,
    fields: FieldRegistry,
    conditions: IndexMap<String, Vec<SimpleCondition>>,
    raw_fragments: Vec<String>,
    children: Vec<PredicateTree>,
    quoter: Arc<dyn ValueQuoter>,
}

impl fmt::Debug for PredicateTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateTree")
            .field("id", &self.id)
            .field("combinator", &self.combinator)
            .field("fields", &self.fields)
            .field("conditions", &self.conditions)
            .field("raw_fragments", &self.raw_fragments)
            .field("children", &self.children)
            .finish()
    }
}

impl PredicateTree {
    pub fn new(combinator: Combinator) -> Self {
        Self::with_registry(combinator, FieldRegistry::new())
    }

    /// Node joining its contents with AND
    pub fn and() -> Self {
        Self::new(Combinator::And)
    }

    /// Node joining its contents with OR
    pub fn or() -> Self {
        Self::new(Combinator::Or)
    }

    pub fn with_registry(combinator: Combinator, fields: FieldRegistry) -> Self {
        Self {
            id: Uuid::new_v4(),
            combinator,
            fields,
            conditions: IndexMap::new(),
            raw_fragments: Vec::new(),
            children: Vec::new(),
            quoter: Arc::new(PgQuoter),
        }
    }

    pub fn with_fields<I, E>(combinator: Combinator, entries: I) -> Result<Self, QueryClauseError>
    where
        I: IntoIterator<Item = E>,
        E: Into<FieldEntry>,
    {
        Ok(Self::with_registry(
            combinator,
            FieldRegistry::from_entries(entries)?,
        ))
    }

    /// Use `quoter` for literal lists. Only the quoter of the node a render
    /// starts from is consulted.
    pub fn with_quoter(mut self, quoter: Arc<dyn ValueQuoter>) -> Self {
        self.quoter = quoter;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn add_field(&mut self, alias: &str, sql_form: Option<&str>) -> Result<(), QueryClauseError> {
        self.fields.add_field(alias, sql_form)
    }

    /// Replace the field set. Conditions already added keep the SQL form
    /// they were created with.
    pub fn add_fields<I, E>(&mut self, entries: I) -> Result<(), QueryClauseError>
    where
        I: IntoIterator<Item = E>,
        E: Into<FieldEntry>,
    {
        self.fields.add_fields(entries)
    }

    /// Add `field OP value`. Conditions accumulate per field in insertion order
    /// and fields render in the order they were registered.
    pub fn add_simple_condition(
        &mut self,
        field: &str,
        value: impl Into<Value>,
        operator: Operator,
        quantifier: Option<Quantifier>,
    ) -> Result<(), QueryClauseError> {
        let sql_form = self
            .fields
            .get(field)
            .ok_or_else(|| QueryClauseError::UnknownField(field.to_string()))?
            .to_string();
        let comparison = Comparison::new(field, operator, value.into(), quantifier)?;

        debug_log!("Adding condition on '{}' with operator {}", field, operator);

        self.conditions
            .entry(field.to_string())
            .or_default()
            .push(SimpleCondition {
                field: field.to_string(),
                sql_form,
                comparison,
            });
        Ok(())
    }

    /// Like [`add_simple_condition`](Self::add_simple_condition) with the operator
    /// and quantifier given in their SQL spelling, as they arrive from request parameters
    pub fn add_parsed_condition(
        &mut self,
        field: &str,
        value: impl Into<Value>,
        operator: &str,
        quantifier: Option<&str>,
    ) -> Result<(), QueryClauseError> {
        let operator: Operator = operator.parse()?;
        let quantifier = quantifier.map(str::parse::<Quantifier>).transpose()?;
        self.add_simple_condition(field, value, operator, quantifier)
    }

    pub fn eq(&mut self, field: &str, value: impl Into<Value>) -> Result<(), QueryClauseError> {
        self.add_simple_condition(field, value, Operator::Eq, None)
    }

    pub fn in_values(&mut self, field: &str, values: Vec<Value>) -> Result<(), QueryClauseError> {
        self.add_simple_condition(field, Value::Array(values), Operator::In, None)
    }

    pub fn between(
        &mut self,
        field: &str,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Result<(), QueryClauseError> {
        let bounds = Value::Array(vec![from.into(), to.into()]);
        self.add_simple_condition(field, bounds, Operator::Between, None)
    }

    pub fn is_null(&mut self, field: &str) -> Result<(), QueryClauseError> {
        self.add_simple_condition(field, Value::Null, Operator::IsNull, None)
    }

    /// Append a raw boolean fragment.
    ///
    /// The fragment is trusted: it is neither escaped nor scanned for parameters.
    pub fn add_sql_condition(&mut self, sql: impl Into<String>) {
        self.raw_fragments.push(sql.into());
    }

    /// Nest `child` as a parenthesized sub-expression and copy its fields into
    /// this node's registry.
    ///
    /// Fails with [`QueryClauseError::DuplicateChild`] when `child` (or one of
    /// its descendants) is already part of this tree, and with
    /// [`QueryClauseError::Conflict`] on field collisions. Nothing changes on failure.
    pub fn add_conditions(&mut self, child: PredicateTree) -> Result<(), QueryClauseError> {
        let mut ours = Vec::new();
        self.collect_ids(&mut ours);
        let mut theirs = Vec::new();
        child.collect_ids(&mut theirs);

        if let Some(duplicate) = theirs.iter().find(|id| ours.contains(*id)) {
            debug_log!("Rejected duplicate sub-tree {}", duplicate);
            return Err(QueryClauseError::DuplicateChild(*duplicate));
        }

        self.fields.merge(&child.fields)?;
        debug_log!("Attached sub-tree {} to {}", child.id, self.id);
        self.children.push(child);
        Ok(())
    }

    pub fn children(&self) -> &[PredicateTree] {
        &self.children
    }

    pub fn clear_all_conditions(&mut self) {
        self.conditions.clear();
        self.raw_fragments.clear();
        self.children.clear();
    }

    /// Drop the conditions on `field`, keeping its registration
    pub fn clear_simple_condition(&mut self, field: &str) {
        if let Some(conditions) = self.conditions.get_mut(field) {
            conditions.clear();
        }
    }

    pub fn simple_conditions(&self, field: &str) -> &[SimpleCondition] {
        self.conditions.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether this node or any descendant renders at least one condition
    pub fn has_conditions(&self) -> bool {
        self.conditions.values().any(|list| !list.is_empty())
            || !self.raw_fragments.is_empty()
            || self.children.iter().any(PredicateTree::has_conditions)
    }

    /// Boolean SQL for this node, advancing `cursor` exactly as
    /// [`get_bind_params`](Self::get_bind_params) does
    pub fn get_where(&self, cursor: &mut Cursor) -> String {
        let mut params = BindParams::new();
        self.render_into(cursor, self.quoter.as_ref(), &mut params)
    }

    /// Bind values keyed by placeholder name, in the order
    /// [`get_where`](Self::get_where) references them
    pub fn get_bind_params(&self, cursor: &mut Cursor) -> BindParams {
        let mut params = BindParams::new();
        self.render_into(cursor, self.quoter.as_ref(), &mut params);
        params
    }

    /// SQL and bind parameters from one traversal starting at `start`
    pub fn render(&self, start: u32) -> RenderedWhere {
        let mut cursor = Cursor::new(start);
        let mut params = BindParams::new();
        let sql = self.render_into(&mut cursor, self.quoter.as_ref(), &mut params);
        debug_log!("Rendered WHERE with {} bind parameters", params.len());
        RenderedWhere { sql, params }
    }

    // Simple conditions first, then non-empty children, then raw fragments.
    // Every simple condition takes one cursor slot (unary ones included) and
    // every rendered child takes one more after its own contents.
    fn render_into(&self, cursor: &mut Cursor, quoter: &dyn ValueQuoter, params: &mut BindParams) -> String {
        let mut parts = Vec::new();

        // Registered fields in registration order, then fields dropped by a
        // later add_fields whose conditions are still held
        let registered = self
            .fields
            .aliases()
            .filter_map(|alias| self.conditions.get_key_value(alias));
        let unregistered = self
            .conditions
            .iter()
            .filter(|(alias, _)| !self.fields.contains(alias));

        for (alias, conditions) in registered.chain(unregistered) {
            for condition in conditions {
                let placeholder = cursor.next_placeholder(alias);
                parts.push(condition.comparison.to_sql(&condition.sql_form, &placeholder, quoter));
                condition.comparison.collect_params(&placeholder, params);
            }
        }

        for child in &self.children {
            if !child.has_conditions() {
                continue;
            }
            let sql = child.render_into(cursor, quoter, params);
            parts.push(format!("({})", sql));
            cursor.advance();
        }

        parts.extend(self.raw_fragments.iter().cloned());

        if parts.is_empty() {
            return self.combinator.identity().to_string();
        }
        parts.join(self.combinator.to_sql())
    }

    fn collect_ids(&self, ids: &mut Vec<Uuid>) {
        ids.push(self.id);
        for child in &self.children {
            child.collect_ids(ids);
        }
    }
}

impl Default for PredicateTree {
    fn default() -> Self {
        Self::and()
    }
}
