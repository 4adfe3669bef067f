//! Prepared statements
//!
//! Rendered clauses use named `:placeholder` markers. PostgreSQL (and sqlx)
//! expect positional `$n` markers, so this module rewrites the SQL and lines
//! the bind values up with the positions. Nothing here executes SQL.

use crate::errors::QueryClauseError;
use crate::predicate::RenderedWhere;
use crate::BindParams;
use indexmap::IndexMap;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};
use sqlx::Postgres;

// Homogeneous arrays bind as typed PostgreSQL arrays so that `= ANY (col)`
// and friends compare element types, anything else falls back to JSON text.
macro_rules! bind_json_array {
    ($query:expr, $items:expr) => {{
        let items: Vec<Value> = $items;
        if let Some(strings) = items.iter().map(|v| v.as_str().map(str::to_string)).collect::<Option<Vec<String>>>() {
            $query.bind(strings)
        } else if let Some(ints) = items.iter().map(Value::as_i64).collect::<Option<Vec<i64>>>() {
            $query.bind(ints)
        } else if let Some(floats) = items.iter().map(Value::as_f64).collect::<Option<Vec<f64>>>() {
            $query.bind(floats)
        } else if let Some(bools) = items.iter().map(Value::as_bool).collect::<Option<Vec<bool>>>() {
            $query.bind(bools)
        } else {
            $query.bind(Value::Array(items).to_string())
        }
    }};
}

macro_rules! bind_json_param {
    ($query:expr, $param:expr) => {
        match $param {
            Value::String(s) => {
                // Try to parse as RFC3339 timestamp first
                if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                    $query.bind(dt.with_timezone(&chrono::Utc))
                // Try to parse as UUID
                } else if let Ok(uuid) = uuid::Uuid::parse_str(&s) {
                    $query.bind(uuid)
                } else {
                    $query.bind(s)
                }
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            Value::Bool(b) => $query.bind(b),
            Value::Null => $query.bind(Option::<String>::None),
            Value::Array(items) => bind_json_array!($query, items),
            other => $query.bind(other.to_string()),
        }
    };
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// Longest parameter name at the start of `rest` that is not followed by
// more name characters
fn bound_name<'p>(rest: &str, params: &'p BindParams) -> Option<&'p str> {
    params
        .keys()
        .map(String::as_str)
        .filter(|name| !name.is_empty() && rest.starts_with(*name))
        .filter(|name| !rest[name.len()..].starts_with(is_name_char))
        .max_by_key(|name| name.len())
}

/// SQL with positional placeholders and the values to bind to them
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStatement {
    sql: String,
    values: Vec<Value>,
}

impl PreparedStatement {
    /// Rewrite `:name` markers in `sql` to `$n`.
    ///
    /// Names are matched against the keys of `params`, longest first, so
    /// aliases with dots or non-ASCII letters resolve like any other.
    /// Each distinct name gets one position, in order of first appearance.
    /// `::casts`, quoted literals and quoted identifiers are copied unchanged.
    pub fn from_named(sql: &str, params: &BindParams) -> Result<Self, QueryClauseError> {
        let mut positions: IndexMap<&str, usize> = IndexMap::new();
        let mut rewritten = String::with_capacity(sql.len());
        let mut quote: Option<char> = None;
        let mut offset = 0;

        while let Some(c) = sql[offset..].chars().next() {
            offset += c.len_utf8();

            if let Some(open) = quote {
                if c == open {
                    quote = None;
                }
                rewritten.push(c);
                continue;
            }

            match c {
                '\'' | '"' => {
                    quote = Some(c);
                    rewritten.push(c);
                }
                ':' => {
                    let rest = &sql[offset..];
                    if rest.starts_with(':') {
                        offset += 1;
                        rewritten.push_str("::");
                    } else if let Some(name) = bound_name(rest, params) {
                        offset += name.len();
                        let next_position = positions.len() + 1;
                        let position = *positions.entry(name).or_insert(next_position);
                        rewritten.push('$');
                        rewritten.push_str(&position.to_string());
                    } else if rest.starts_with(|c: char| c.is_alphabetic() || c == '_') {
                        let name: String = rest
                            .chars()
                            .take_while(|&c| is_name_char(c) || c == '.')
                            .collect();
                        return Err(QueryClauseError::UnboundPlaceholder(name));
                    } else {
                        rewritten.push(c);
                    }
                }
                c => rewritten.push(c),
            }
        }

        let values = positions
            .keys()
            .filter_map(|name| params.get(*name).cloned())
            .collect();

        trace_log!("Prepared statement: {}", rewritten);
        Ok(Self {
            sql: rewritten,
            values,
        })
    }

    /// `base_sql WHERE ... ORDER BY ...`, the ORDER BY part omitted when empty
    pub fn select(base_sql: &str, filter: &RenderedWhere, order_by: &str) -> Result<Self, QueryClauseError> {
        let mut sql = String::with_capacity(base_sql.len() + filter.sql.len() + order_by.len() + 8);
        sql.push_str(base_sql);
        sql.push_str(" WHERE ");
        sql.push_str(&filter.sql);
        if !order_by.is_empty() {
            sql.push(' ');
            sql.push_str(order_by);
        }
        Self::from_named(&sql, &filter.params)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Untyped sqlx query with every value bound
    pub fn query(&self) -> Query<'_, Postgres, PgArguments> {
        self.bind_all(sqlx::query(&self.sql))
    }

    /// Typed sqlx query with every value bound
    pub fn query_as<O>(&self) -> QueryAs<'_, Postgres, O, PgArguments>
    where
        O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
    {
        self.bind_all_as(sqlx::query_as::<_, O>(&self.sql))
    }

    pub fn bind_all<'q>(&self, mut query: Query<'q, Postgres, PgArguments>) -> Query<'q, Postgres, PgArguments> {
        for value in &self.values {
            query = bind_json_param!(query, value.clone());
        }
        query
    }

    pub fn bind_all_as<'q, O>(
        &self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for value in &self.values {
            query = bind_json_param!(query, value.clone());
        }
        query
    }
}
